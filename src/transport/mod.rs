//! Outbound fetch capability. One trait, one adapter per backend: the pipeline only ever sees
//! `fetch_json(url) -> (status, body | None)`.

mod direct;
#[cfg(test)]
pub mod mock;
mod proxy;

use crate::config::config::{TransportConfig, TransportKind};
use crate::util::rate_limiter::RequestPacer;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use direct::DirectTransport;
pub use proxy::ProxyTransport;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl FetchResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        FetchResponse { status, body }
    }

    /// A call only counts when the embedded status is 200 and the payload decoded to JSON.
    pub fn is_success(&self) -> bool {
        self.status == 200 && self.body.is_some()
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("error sending request: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport is misconfigured: {0}")]
    ConfigError(String),
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// Decodes an upstream body into JSON. HTML pages (bot walls, error pages) and anything that
/// does not parse come back as `None` instead of an error.
pub fn decode_payload(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Discarding non-JSON payload: {}", e);
            None
        }
    }
}

pub fn build_transport(config: &TransportConfig) -> Result<Arc<dyn Fetcher>, TransportError> {
    let pacer = RequestPacer::new(config.requests_per_second);
    log::info!(
        "Using {:?} transport, one request every {:?}",
        config.kind,
        pacer.interval()
    );
    match config.kind {
        TransportKind::Direct => Ok(Arc::new(DirectTransport::new(pacer)?)),
        TransportKind::Proxy => {
            let endpoint = config.proxy_api_url.clone().ok_or_else(|| {
                TransportError::ConfigError("proxy endpoint is not set".to_string())
            })?;
            let api_key = config.proxy_api_key.clone().ok_or_else(|| {
                TransportError::ConfigError("proxy api key is not set".to_string())
            })?;
            Ok(Arc::new(ProxyTransport::new(endpoint, api_key, pacer)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_json_objects() {
        assert_eq!(
            decode_payload("  {\"events\": []}\n"),
            Some(json!({"events": []}))
        );
    }

    #[test]
    fn html_documents_are_soft_failures() {
        assert_eq!(decode_payload("<!DOCTYPE html><html></html>"), None);
        assert_eq!(decode_payload("\n  <html>blocked</html>"), None);
    }

    #[test]
    fn unparseable_and_empty_bodies_are_soft_failures() {
        assert_eq!(decode_payload("{\"events\": ["), None);
        assert_eq!(decode_payload("   "), None);
    }

    #[test]
    fn success_requires_status_and_body() {
        assert!(FetchResponse::new(200, Some(json!({}))).is_success());
        assert!(!FetchResponse::new(200, None).is_success());
        assert!(!FetchResponse::new(403, Some(json!({}))).is_success());
    }

    #[test]
    fn proxy_transport_requires_credentials() {
        let config = TransportConfig {
            kind: TransportKind::Proxy,
            proxy_api_url: Some("https://proxy.example.com/v1".to_string()),
            proxy_api_key: None,
            requests_per_second: 1.0,
        };
        assert!(matches!(
            build_transport(&config),
            Err(TransportError::ConfigError(_))
        ));
    }
}
