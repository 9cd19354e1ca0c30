//! Single-stream HTTP GET of the archive, written straight into a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{MdlError, Result};

/// Abort when the transfer stays below this rate for `LOW_SPEED_TIME`.
const LOW_SPEED_LIMIT: u32 = 1024;
const LOW_SPEED_TIME: Duration = Duration::from_secs(60);

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    connect_timeout: Duration,
) -> std::result::Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(connect_timeout)?;
    easy.low_speed_limit(LOW_SPEED_LIMIT)?;
    easy.low_speed_time(LOW_SPEED_TIME)?;
    Ok(())
}

/// Streams the body of `url` into `file` (whose path is `path`, for errors).
/// Returns the number of bytes written. Nothing is buffered beyond curl's chunks.
pub fn download_to_file(
    url: &str,
    file: &mut File,
    path: &Path,
    connect_timeout: Duration,
) -> Result<u64> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, connect_timeout).map_err(|e| {
        MdlError::download_transport(format!("invalid download request for {url}"), e)
    })?;

    let mut written = 0u64;
    let mut write_err: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(|e| MdlError::download_transport("curl setup failed", e))?;
        transfer.perform()
    };

    // A local write failure shows up as a curl write error; report the real cause.
    if let Some(e) = write_err {
        return Err(MdlError::filesystem(path, e));
    }
    performed.map_err(|e| MdlError::download_transport(format!("GET {url}"), e))?;

    let code = easy
        .response_code()
        .map_err(|e| MdlError::download_transport(format!("GET {url}: no response code"), e))?;
    if !(200..300).contains(&code) {
        return Err(MdlError::DownloadTransport {
            context: format!("GET {url} returned HTTP {code}"),
            source: None,
        });
    }

    file.flush().map_err(|e| MdlError::filesystem(path, e))?;
    tracing::info!(bytes = written, "archive downloaded");
    Ok(written)
}
