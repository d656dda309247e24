use super::{decode_payload, FetchResponse, Fetcher, TransportError};
use crate::util::rate_limiter::RequestPacer;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Talks to the API directly, the way a browser tab on the site would.
pub struct DirectTransport {
    client: reqwest::Client,
    pacer: RequestPacer,
}

impl DirectTransport {
    pub fn new(pacer: RequestPacer) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(DirectTransport { client, pacer })
    }
}

#[async_trait]
impl Fetcher for DirectTransport {
    async fn fetch_json(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.pacer.wait().await;
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(FetchResponse::new(status, decode_payload(&text)))
    }
}
