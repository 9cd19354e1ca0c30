//! CLI for mdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mdl_core::config;
use std::path::PathBuf;

use commands::{run_config, run_download, DownloadArgs};

/// Top-level CLI for mdl.
#[derive(Debug, Parser)]
#[command(name = "mdl")]
#[command(
    about = "mdl: download music archives via a link-resolution service (tidal, qobuz, soundcloud, deezer, spotify, youtube, jiosaavn)",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a music URL, download the archive and unzip it.
    Download {
        /// Album, track or playlist URL on a supported service.
        url: String,

        /// Directory to store the downloaded music in.
        #[arg(short = 'o', long, value_name = "DIR")]
        output_directory: PathBuf,

        /// Quality: 0 = best available, 1 = 128kbps MP3/AAC, 2 = 320kbps MP3/AAC,
        /// 3 = 16bit 44.1kHz, 4 = 24bit ≤96kHz, 5 = 24bit ≤192kHz.
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=5))]
        quality: u8,

        /// Seconds to wait for a download link (added to --timeout-duration-minutes).
        #[arg(short = 's', long, default_value_t = 0)]
        timeout_duration_seconds: u64,

        /// Minutes to wait for a download link (added to --timeout-duration-seconds).
        #[arg(short = 'm', long, default_value_t = 2)]
        timeout_duration_minutes: u64,

        /// Do not extract cover.jpg.
        #[arg(short = 'c', long)]
        ignore_cover: bool,

        /// Put every file directly in the output directory.
        #[arg(short = 'd', long)]
        ignore_subdirectories: bool,
    },

    /// Print the config file location (creating it with defaults if missing).
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                url,
                output_directory,
                quality,
                timeout_duration_seconds,
                timeout_duration_minutes,
                ignore_cover,
                ignore_subdirectories,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!(service_url = ?cfg.service_url, "loaded config");
                let args = DownloadArgs {
                    url,
                    output_directory,
                    quality,
                    timeout_minutes: timeout_duration_minutes,
                    timeout_seconds: timeout_duration_seconds,
                    ignore_cover,
                    ignore_subdirectories,
                };
                run_download(&cfg, &args)?;
            }
            CliCommand::Config => run_config()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
