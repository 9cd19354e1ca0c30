//! `mdl download <url>` – resolve, download and unzip.

use anyhow::{Context, Result};
use mdl_core::config::MdlConfig;
use mdl_core::host;
use mdl_core::resolver::{self, Deadline, QualityLevel, ResolutionRequest, ServiceClient};
use mdl_core::retriever::{self, ExtractionPolicy, RetrieveOptions, RetrieveStage};
use std::path::PathBuf;

/// Inputs collected from the command line.
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub url: String,
    pub output_directory: PathBuf,
    pub quality: u8,
    pub timeout_minutes: u64,
    pub timeout_seconds: u64,
    pub ignore_cover: bool,
    pub ignore_subdirectories: bool,
}

pub fn run_download(cfg: &MdlConfig, args: &DownloadArgs) -> Result<()> {
    // Deadline is fixed before any network work starts.
    let deadline = Deadline::from_parts(args.timeout_minutes, args.timeout_seconds);

    host::validate_source_url(&args.url, &cfg.allowed_hosts)?;
    let quality = QualityLevel::new(args.quality)?;
    let output_directory = std::path::absolute(&args.output_directory).with_context(|| {
        format!(
            "failed to resolve output directory {}",
            args.output_directory.display()
        )
    })?;

    let client = ServiceClient::from_config(cfg)?;
    let request = ResolutionRequest::new(args.url.as_str(), quality, deadline);
    let policy = ExtractionPolicy {
        skip_cover_image: args.ignore_cover,
        flatten_directories: args.ignore_subdirectories,
    };
    tracing::info!(url = %args.url, quality = quality.get(), "download requested");

    println!("Getting download link...");
    let download_url = resolver::resolve(&client, &request, cfg.poll_interval())?;

    let summary = retriever::retrieve_with_progress(
        &download_url,
        &output_directory,
        &policy,
        &RetrieveOptions::from_config(cfg),
        |stage| match stage {
            RetrieveStage::Downloading => println!("Downloading zip..."),
            RetrieveStage::Extracting => println!("Unzipping..."),
        },
    )?;

    println!(
        "Unzipped {} file(s) into {}",
        summary.files_written,
        output_directory.display()
    );
    println!("Done!");
    Ok(())
}
