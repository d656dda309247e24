use super::{decode_payload, FetchResponse, Fetcher, TransportError};
use crate::util::rate_limiter::RequestPacer;
use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ProxyRequest<'a> {
    url: &'a str,
}

/// What the scraping proxy answers with: the upstream status and the upstream body, base64.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    #[serde(rename = "statusCode")]
    status_code: u16,
    body: Option<String>,
}

pub struct ProxyTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    pacer: RequestPacer,
}

impl ProxyTransport {
    pub fn new(endpoint: String, api_key: String, pacer: RequestPacer) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(ProxyTransport {
            client,
            endpoint,
            api_key,
            pacer,
        })
    }
}

#[async_trait]
impl Fetcher for ProxyTransport {
    async fn fetch_json(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.pacer.wait().await;
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ProxyRequest { url })
            .send()
            .await?;
        let http_status = response.status().as_u16();
        let text = response.text().await?;
        Ok(decode_envelope(http_status, &text))
    }
}

/// Unwraps a proxy envelope. A proxy-level failure keeps the proxy's own status; an envelope
/// that cannot be read or whose body is not valid base64 yields a `None` body.
fn decode_envelope(http_status: u16, text: &str) -> FetchResponse {
    let envelope = match serde_json::from_str::<ProxyEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            log::warn!("Proxy answered {} with an unreadable envelope: {}", http_status, e);
            return FetchResponse::new(http_status, None);
        }
    };

    let body = envelope.body.as_deref().and_then(|encoded| {
        match general_purpose::STANDARD.decode(encoded.trim()) {
            Ok(bytes) => decode_payload(&String::from_utf8_lossy(&bytes)),
            Err(e) => {
                log::warn!("Proxy body is not valid base64: {}", e);
                None
            }
        }
    });
    FetchResponse::new(envelope.status_code, body)
}
