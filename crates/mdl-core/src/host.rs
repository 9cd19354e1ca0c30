//! Source URL validation against the host allow-list.

use crate::error::{MdlError, Result};
use url::Url;

/// Parses `source` and checks its host against `allowed_hosts` (exact match).
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn validate_source_url<S: AsRef<str>>(source: &str, allowed_hosts: &[S]) -> Result<Url> {
    let parsed = Url::parse(source)
        .map_err(|e| MdlError::invalid_input(format!("malformed URL {source:?}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(MdlError::invalid_input(format!(
            "unsupported URL scheme {:?}",
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| MdlError::invalid_input(format!("URL has no host: {source}")))?;

    if !allowed_hosts.iter().any(|allowed| allowed.as_ref() == host) {
        return Err(MdlError::invalid_input(format!("host not allowed: {host}")));
    }

    Ok(parsed)
}
