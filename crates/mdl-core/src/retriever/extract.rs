//! Filtered zip extraction.
//!
//! Entries are processed in archive order. Every entry name must stay inside
//! the destination (no absolute paths, no `..` climbing out); the first bad
//! or unreadable entry aborts the run and leaves earlier output in place.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{MdlError, Result};

/// Archive member treated as the cover image (matched case-sensitively on the base name).
pub const COVER_IMAGE_NAME: &str = "cover.jpg";

const BUF_SIZE: usize = 64 * 1024;

/// Per-entry filters applied while extracting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionPolicy {
    pub skip_cover_image: bool,
    pub flatten_directories: bool,
}

/// Counts reported after a successful extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub files_written: usize,
    pub directories_created: usize,
    pub entries_skipped: usize,
}

/// What to do with one archive entry, relative to the destination.
#[derive(Debug, PartialEq, Eq)]
enum EntryAction {
    Skip(&'static str),
    CreateDir(PathBuf),
    WriteFile(PathBuf),
}

/// Decide the output for an entry whose safe relative path is `relative`.
fn plan_entry(relative: &Path, is_dir: bool, policy: &ExtractionPolicy) -> Option<EntryAction> {
    if is_dir {
        if policy.flatten_directories {
            return Some(EntryAction::Skip("directory entry while flattening"));
        }
        return Some(EntryAction::CreateDir(relative.to_path_buf()));
    }

    let base = relative.file_name()?;
    if policy.skip_cover_image && base == OsStr::new(COVER_IMAGE_NAME) {
        return Some(EntryAction::Skip("cover image"));
    }

    if policy.flatten_directories {
        Some(EntryAction::WriteFile(PathBuf::from(base)))
    } else {
        Some(EntryAction::WriteFile(relative.to_path_buf()))
    }
}

/// Copy one entry into `out_path`. Read failures are extraction errors,
/// write failures are filesystem errors.
fn copy_entry<R: Read>(reader: &mut R, out_path: &Path, entry_name: &str) -> Result<u64> {
    let mut out = File::create(out_path).map_err(|e| MdlError::filesystem(out_path, e))?;
    let mut buf = vec![0u8; BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(MdlError::extraction(format!("read entry {entry_name:?}"), e));
            }
        };
        out.write_all(&buf[..n])
            .map_err(|e| MdlError::filesystem(out_path, e))?;
        total += n as u64;
    }
    out.flush().map_err(|e| MdlError::filesystem(out_path, e))?;
    Ok(total)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| MdlError::filesystem(path, e))
}

/// Extract the zip at `archive_path` into `destination`, creating it if needed.
pub fn extract_archive(
    archive_path: &Path,
    destination: &Path,
    policy: &ExtractionPolicy,
) -> Result<ExtractionSummary> {
    create_dir(destination)?;

    let file = File::open(archive_path).map_err(|e| MdlError::filesystem(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        MdlError::extraction(format!("open archive {}", archive_path.display()), e)
    })?;

    let mut summary = ExtractionSummary::default();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| MdlError::extraction(format!("read entry #{i}"), e))?;
        let name = entry.name().to_string();

        let relative = entry.enclosed_name().ok_or_else(|| MdlError::Extraction {
            context: format!("entry {name:?} escapes the destination directory"),
            source: None,
        })?;

        let action = plan_entry(&relative, entry.is_dir(), policy).ok_or_else(|| {
            MdlError::Extraction {
                context: format!("entry {name:?} has no file name"),
                source: None,
            }
        })?;

        match action {
            EntryAction::Skip(reason) => {
                tracing::debug!(entry = %name, reason, "skipping entry");
                summary.entries_skipped += 1;
            }
            EntryAction::CreateDir(rel) => {
                create_dir(&destination.join(rel))?;
                summary.directories_created += 1;
            }
            EntryAction::WriteFile(rel) => {
                let out_path = destination.join(rel);
                if let Some(parent) = out_path.parent() {
                    create_dir(parent)?;
                }
                let bytes = copy_entry(&mut entry, &out_path, &name)?;
                tracing::debug!(entry = %name, bytes, "extracted");
                summary.files_written += 1;
            }
        }
    }

    tracing::info!(
        files = summary.files_written,
        dirs = summary.directories_created,
        skipped = summary.entries_skipped,
        "extraction complete"
    );
    Ok(summary)
}
