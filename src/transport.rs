//! # HTTP Transport
//!
//! The single network seam of the client. Analysis tasks only ever issue one
//! `post` per round-trip; implementations decide how the bytes travel.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::constants::system;
use crate::error::{AnalystError, AnalystResult, TransportError};

/// Per-request timeout policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestTimeout {
    /// Five seconds
    #[default]
    Default,
    Unlimited,
    Seconds(u64),
}

impl RequestTimeout {
    /// Map a configured value: negative uses the default, zero disables the timeout
    pub fn from_seconds(seconds: i64) -> Self {
        match seconds {
            s if s < 0 => RequestTimeout::Default,
            0 => RequestTimeout::Unlimited,
            s => RequestTimeout::Seconds(s.unsigned_abs()),
        }
    }

    pub fn as_duration(self) -> Option<Duration> {
        match self {
            RequestTimeout::Default => Some(Duration::from_secs(system::DEFAULT_TIMEOUT_SECONDS)),
            RequestTimeout::Unlimited => None,
            RequestTimeout::Seconds(s) => Some(Duration::from_secs(s)),
        }
    }
}

/// Posts an encoded analysis payload and returns the response body, if any
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn post(
        &self,
        url: &Url,
        body: String,
        timeout: Option<Duration>,
    ) -> Result<Option<String>, TransportError>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: Option<&str>) -> AnalystResult<Self> {
        let user_agent = user_agent
            .map(str::to_string)
            .unwrap_or_else(|| format!("gis-analyst-client/{}", env!("CARGO_PKG_VERSION")));

        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AnalystError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: String,
        timeout: Option<Duration>,
    ) -> Result<Option<String>, TransportError> {
        debug!("Posting analysis request to: {}", url);

        let mut request = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, system::JSON_CONTENT_TYPE)
            .body(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Analysis request failed: {} - {}", status, error_text);
            return Err(TransportError::status(status.as_u16(), error_text));
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        Ok(if text.is_empty() { None } else { Some(text) })
    }
}

fn classify_error(error: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    match timeout {
        Some(limit) if error.is_timeout() => TransportError::Timeout(limit),
        _ if error.is_connect() => TransportError::connection(error.to_string()),
        _ => TransportError::Http(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_sentinel_mapping() {
        assert_eq!(RequestTimeout::from_seconds(-1), RequestTimeout::Default);
        assert_eq!(RequestTimeout::from_seconds(-30), RequestTimeout::Default);
        assert_eq!(RequestTimeout::from_seconds(0), RequestTimeout::Unlimited);
        assert_eq!(RequestTimeout::from_seconds(12), RequestTimeout::Seconds(12));
    }

    #[test]
    fn test_timeout_durations() {
        assert_eq!(
            RequestTimeout::Default.as_duration(),
            Some(Duration::from_secs(5))
        );
        assert_eq!(RequestTimeout::Unlimited.as_duration(), None);
        assert_eq!(
            RequestTimeout::Seconds(30).as_duration(),
            Some(Duration::from_secs(30))
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let transport = HttpTransport::new(None).unwrap();
        // Port 9 (discard) on loopback is essentially never listening
        let url = Url::parse("http://127.0.0.1:9/geometry/overlay.json").unwrap();
        let result = transport
            .post(&url, "{}".to_string(), Some(Duration::from_secs(2)))
            .await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }
}
