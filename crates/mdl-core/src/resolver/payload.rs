//! JSON status payload returned by the resolution service.

use serde::Deserialize;

use super::ResolutionOutcome;

const NO_REASON: &str = "no reason given";

/// `{"status": "pending" | "ready" | "failed", ...}`
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusPayload {
    Pending,
    Ready {
        #[serde(default)]
        url: Option<String>,
    },
    Failed {
        #[serde(default)]
        reason: Option<String>,
    },
}

/// Why a syntactically valid payload still cannot be used.
#[derive(Debug, PartialEq, Eq)]
pub enum PayloadError {
    ReadyWithoutUrl,
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::ReadyWithoutUrl => write!(f, "status \"ready\" without a download url"),
        }
    }
}

impl std::error::Error for PayloadError {}

impl StatusPayload {
    pub fn into_outcome(self) -> Result<ResolutionOutcome, PayloadError> {
        match self {
            StatusPayload::Pending => Ok(ResolutionOutcome::Pending),
            StatusPayload::Ready { url } => match url.map(|u| u.trim().to_string()) {
                Some(u) if !u.is_empty() => Ok(ResolutionOutcome::Ready(u)),
                _ => Err(PayloadError::ReadyWithoutUrl),
            },
            StatusPayload::Failed { reason } => {
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| NO_REASON.to_string());
                Ok(ResolutionOutcome::Failed(reason))
            }
        }
    }
}
