//! CLI command handlers, one per file.

mod config;
mod download;

pub use config::run_config;
pub use download::{run_download, DownloadArgs};
