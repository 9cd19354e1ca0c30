//! HTTP client for the resolution service.
//!
//! Each status query is a GET carrying the source URL and quality as query
//! parameters; the service answers with a JSON status payload. Uses the curl
//! crate (libcurl) in the current thread.

use std::time::Duration;

use url::Url;

use super::payload::StatusPayload;
use super::{Deadline, ResolutionOutcome, ResolutionRequest, StatusSource};
use crate::config::MdlConfig;
use crate::error::{MdlError, Result};

/// Shortest whole-request timeout given to a status query near the deadline.
const MIN_QUERY_TIMEOUT: Duration = Duration::from_secs(1);

/// Talks to a resolution service endpoint.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    endpoint: Url,
    session_token: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ServiceClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            MdlError::invalid_input(format!("invalid resolution service URL {endpoint:?}: {e}"))
        })?;
        Ok(Self {
            endpoint,
            session_token: None,
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        })
    }

    /// Builds a client from config; fails when `service_url` is unset.
    pub fn from_config(cfg: &MdlConfig) -> Result<Self> {
        let endpoint = cfg.service_url.as_deref().ok_or_else(|| {
            MdlError::invalid_input("service_url is not set in the mdl config file")
        })?;
        let mut client = Self::new(endpoint)?
            .with_timeouts(cfg.connect_timeout(), cfg.request_timeout());
        if let Some(token) = cfg.session_token.as_deref().map(str::trim) {
            if !token.is_empty() {
                client = client.with_session_token(token);
            }
        }
        Ok(client)
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    /// Status query URL for `request`: endpoint plus `url` and `quality` parameters.
    pub fn query_url(&self, request: &ResolutionRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", request.source_url())
            .append_pair("quality", &request.quality().get().to_string());
        url
    }

    /// Whole-request timeout for a query made now: the configured timeout,
    /// cut down to the time left before `deadline` (never below one second).
    pub fn query_timeout(&self, deadline: Deadline) -> Duration {
        self.request_timeout.min(deadline.remaining().max(MIN_QUERY_TIMEOUT))
    }

    fn fetch_status(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> std::result::Result<(u32, Vec<u8>), curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        if let Some(token) = &self.session_token {
            list.append(&format!("Authorization: Bearer {token}"))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl StatusSource for ServiceClient {
    fn query(&self, request: &ResolutionRequest) -> Result<ResolutionOutcome> {
        let url = self.query_url(request);
        let timeout = self.query_timeout(request.deadline());
        let (code, body) = self
            .fetch_status(&url, timeout)
            .map_err(|e| MdlError::resolution_transport(format!("GET {}", self.endpoint), e))?;

        if !(200..300).contains(&code) {
            return Err(MdlError::ResolutionTransport {
                context: format!("GET {} returned HTTP {}", self.endpoint, code),
                source: None,
            });
        }

        let payload: StatusPayload = serde_json::from_slice(&body).map_err(|e| {
            let preview = String::from_utf8_lossy(&body[..body.len().min(200)]).into_owned();
            MdlError::resolution_transport(format!("malformed status payload: {preview:?}"), e)
        })?;

        payload
            .into_outcome()
            .map_err(|e| MdlError::resolution_transport("unusable status payload", e))
    }
}
