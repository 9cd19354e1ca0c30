//! Archive retrieval: stream the archive to a temp file, then unpack it.
//!
//! The temp file lives for exactly one `retrieve` call and is removed on
//! every exit path. Download and extraction are not deadline-bounded.

mod download;
mod extract;
mod storage;

pub use download::download_to_file;
pub use extract::{extract_archive, ExtractionPolicy, ExtractionSummary, COVER_IMAGE_NAME};
pub use storage::{TempArchive, TEMP_PREFIX, TEMP_SUFFIX};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::MdlConfig;
use crate::error::Result;

/// Transfer and scratch-space settings for `retrieve`.
#[derive(Debug, Clone)]
pub struct RetrieveOptions {
    /// Where the temp archive goes (None = system temp dir).
    pub temp_dir: Option<PathBuf>,
    pub connect_timeout: Duration,
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            connect_timeout: Duration::from_secs(15),
        }
    }
}

impl RetrieveOptions {
    pub fn from_config(cfg: &MdlConfig) -> Self {
        Self {
            temp_dir: cfg.temp_dir.clone(),
            connect_timeout: cfg.connect_timeout(),
        }
    }
}

/// Step `retrieve` is about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieveStage {
    Downloading,
    Extracting,
}

/// Download the archive at `download_url` and extract it into `destination`.
pub fn retrieve(
    download_url: &str,
    destination: &Path,
    policy: &ExtractionPolicy,
    options: &RetrieveOptions,
) -> Result<ExtractionSummary> {
    retrieve_with_progress(download_url, destination, policy, options, |_| {})
}

/// Like [`retrieve`], calling `on_stage` before the download and before extraction.
pub fn retrieve_with_progress<F>(
    download_url: &str,
    destination: &Path,
    policy: &ExtractionPolicy,
    options: &RetrieveOptions,
    mut on_stage: F,
) -> Result<ExtractionSummary>
where
    F: FnMut(RetrieveStage),
{
    let mut archive = TempArchive::create(options.temp_dir.as_deref())?;
    let archive_path = archive.path().to_path_buf();

    on_stage(RetrieveStage::Downloading);
    let result = download_to_file(
        download_url,
        archive.as_file_mut(),
        &archive_path,
        options.connect_timeout,
    )
    .and_then(|_| {
        on_stage(RetrieveStage::Extracting);
        extract_archive(&archive_path, destination, policy)
    });

    // Removal runs on every path; an earlier error takes precedence.
    let removed = archive.remove();
    let summary = result?;
    removed?;
    Ok(summary)
}
