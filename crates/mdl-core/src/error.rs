//! Error taxonomy for the resolve → download → extract pipeline.
//!
//! Every failure reaching the caller is one of these variants, with the
//! underlying cause kept as the error source. The CLI converts them into
//! `anyhow::Error` for display.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed cause attached to transport and extraction errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, MdlError>;

#[derive(Debug, Error)]
pub enum MdlError {
    /// Malformed or disallowed source URL, or an out-of-range quality level.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The deadline passed while the service still reported the job as pending.
    #[error("timed out waiting for a download link ({attempts} status queries)")]
    ResolutionTimeout { attempts: u32 },

    /// The service gave a definitive failure for this job.
    #[error("resolution service rejected the request: {reason}")]
    ResolutionRejected { reason: String },

    /// Network, HTTP or payload failure while polling the service. Not retried.
    #[error("resolution service request failed: {context}")]
    ResolutionTransport {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Failure while streaming the archive body.
    #[error("archive download failed: {context}")]
    DownloadTransport {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Unreadable archive or entry, or an entry escaping the destination.
    #[error("extraction failed: {context}")]
    Extraction {
        context: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Temp file, destination directory or output file could not be written.
    #[error("filesystem error at {path}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MdlError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        MdlError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn resolution_transport<S, E>(context: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        MdlError::ResolutionTransport {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn download_transport<S, E>(context: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        MdlError::DownloadTransport {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn extraction<S, E>(context: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        MdlError::Extraction {
            context: context.into(),
            source: Some(source.into()),
        }
    }

    pub fn filesystem(path: &Path, source: std::io::Error) -> Self {
        MdlError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}
