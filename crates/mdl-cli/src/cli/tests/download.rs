//! Tests for `download` argument parsing.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_download_defaults() {
    match parse(&["mdl", "download", "https://www.qobuz.com/album/x", "-o", "music"]) {
        CliCommand::Download {
            url,
            output_directory,
            quality,
            timeout_duration_seconds,
            timeout_duration_minutes,
            ignore_cover,
            ignore_subdirectories,
        } => {
            assert_eq!(url, "https://www.qobuz.com/album/x");
            assert_eq!(output_directory, PathBuf::from("music"));
            assert_eq!(quality, 0);
            assert_eq!(timeout_duration_seconds, 0);
            assert_eq!(timeout_duration_minutes, 2);
            assert!(!ignore_cover);
            assert!(!ignore_subdirectories);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_short_flags() {
    match parse(&[
        "mdl",
        "download",
        "https://tidal.com/album/1",
        "-o",
        "/srv/music",
        "-q",
        "5",
        "-s",
        "30",
        "-m",
        "1",
        "-c",
        "-d",
    ]) {
        CliCommand::Download {
            output_directory,
            quality,
            timeout_duration_seconds,
            timeout_duration_minutes,
            ignore_cover,
            ignore_subdirectories,
            ..
        } => {
            assert_eq!(output_directory, PathBuf::from("/srv/music"));
            assert_eq!(quality, 5);
            assert_eq!(timeout_duration_seconds, 30);
            assert_eq!(timeout_duration_minutes, 1);
            assert!(ignore_cover);
            assert!(ignore_subdirectories);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_long_flags() {
    match parse(&[
        "mdl",
        "download",
        "https://open.spotify.com/album/z",
        "--output-directory",
        "out",
        "--quality",
        "3",
        "--timeout-duration-seconds",
        "15",
        "--timeout-duration-minutes",
        "0",
        "--ignore-cover",
        "--ignore-subdirectories",
    ]) {
        CliCommand::Download {
            quality,
            timeout_duration_seconds,
            timeout_duration_minutes,
            ignore_cover,
            ignore_subdirectories,
            ..
        } => {
            assert_eq!(quality, 3);
            assert_eq!(timeout_duration_seconds, 15);
            assert_eq!(timeout_duration_minutes, 0);
            assert!(ignore_cover);
            assert!(ignore_subdirectories);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_download_requires_output_directory() {
    assert!(Cli::try_parse_from(["mdl", "download", "https://tidal.com/album/1"]).is_err());
}

#[test]
fn cli_download_rejects_out_of_range_quality() {
    assert!(Cli::try_parse_from([
        "mdl",
        "download",
        "https://tidal.com/album/1",
        "-o",
        "out",
        "-q",
        "6",
    ])
    .is_err());
}
