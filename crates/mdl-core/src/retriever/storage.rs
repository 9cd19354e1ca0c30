//! Temporary archive file lifecycle.
//!
//! One uniquely named file per download+extract run. `remove` deletes it and
//! reports failures; if the value is dropped instead, the file is deleted
//! silently by `tempfile`.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{MdlError, Result};

pub const TEMP_PREFIX: &str = "mdl.";
pub const TEMP_SUFFIX: &str = ".zip";

pub struct TempArchive {
    file: NamedTempFile,
}

impl TempArchive {
    /// Create `mdl.XXXXXX.zip` in `dir`, or in the system temp dir when `None`.
    pub fn create(dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        let created = match dir {
            Some(d) => builder.tempfile_in(d),
            None => builder.tempfile(),
        };
        let file = created.map_err(|e| {
            let dir: PathBuf = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
            MdlError::filesystem(&dir, e)
        })?;
        tracing::debug!(path = %file.path().display(), "created temp archive");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn as_file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }

    /// Close and delete the file.
    pub fn remove(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|e| MdlError::filesystem(&path, e))?;
        tracing::debug!(path = %path.display(), "removed temp archive");
        Ok(())
    }
}
