//! Bounded retries around a single outbound call.
//!
//! Two ways to fail, handled asymmetrically:
//! - a *logical* failure (the call returned, but not a 200 with a JSON body) ends in
//!   `Ok(RetryOutcome::Exhausted(last_response))`, so callers must look at the outcome;
//! - a *transport* failure (network error, timeout) ends in `Err(RetryError::Exhausted)`.
//!
//! Either way the attempt is written to the request log while retries remain, and exhaustion
//! writes exactly one terminal entry to the failed-request log before handing control back.

use crate::models::request_log::{NewRequestLog, STATUS_FAILED, STATUS_FAILURE, STATUS_SUCCESS};
use crate::repository::AuditLog;
use crate::transport::{FetchResponse, Fetcher, TransportError};
use log::{error, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};

const LOGGED_BODY_LIMIT: usize = 2000;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: Duration,
    /// Deadline for a single attempt.
    pub request_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(5000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// How a retried call ended when no transport error survived.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    Success(FetchResponse),
    /// Every attempt came back without a usable payload. Carries the last response and tells
    /// the driver to move on to its next unit of work.
    Exhausted(FetchResponse),
}

impl RetryOutcome {
    pub fn response(&self) -> &FetchResponse {
        match self {
            RetryOutcome::Success(response) | RetryOutcome::Exhausted(response) => response,
        }
    }

    pub fn into_success(self) -> Option<FetchResponse> {
        match self {
            RetryOutcome::Success(response) => Some(response),
            RetryOutcome::Exhausted(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum RetryError {
    #[error("{context}: giving up on {url} after {attempts} attempts: {source}")]
    Exhausted {
        context: String,
        url: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },
}

pub struct RetryPolicy {
    config: RetryConfig,
    audit: Arc<dyn AuditLog>,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig, audit: Arc<dyn AuditLog>) -> Self {
        RetryPolicy { config, audit }
    }

    pub async fn fetch(
        &self,
        fetcher: &dyn Fetcher,
        url: &str,
        context: &str,
    ) -> Result<RetryOutcome, RetryError> {
        self.run(context, url, || fetcher.fetch_json(url)).await
    }

    pub async fn run<F, Fut>(
        &self,
        context: &str,
        url: &str,
        mut action: F,
    ) -> Result<RetryOutcome, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<FetchResponse, TransportError>>,
    {
        let total_attempts = self.config.max_retries + 1;
        let mut attempt = 1;

        loop {
            let result = match timeout(self.config.request_timeout, action()).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(self.config.request_timeout)),
            };
            let has_more = attempt < total_attempts;

            match result {
                Ok(response) if response.is_success() => {
                    self.record(context, url, STATUS_SUCCESS, attempt, None, Some(&response))
                        .await;
                    return Ok(RetryOutcome::Success(response));
                }
                Ok(response) => {
                    let reason = format!("unexpected status {} or empty body", response.status);
                    if has_more {
                        warn!(
                            "{} failed (attempt {}/{}) for {}: {}",
                            context, attempt, total_attempts, url, reason
                        );
                        self.record(context, url, STATUS_FAILURE, attempt, Some(reason), Some(&response))
                            .await;
                    } else {
                        self.record_exhausted(context, url, attempt, reason, Some(&response))
                            .await;
                        sleep(self.config.backoff).await;
                        return Ok(RetryOutcome::Exhausted(response));
                    }
                }
                Err(e) => {
                    if has_more {
                        warn!(
                            "{} failed (attempt {}/{}) for {}: {}",
                            context, attempt, total_attempts, url, e
                        );
                        self.record(context, url, STATUS_FAILURE, attempt, Some(e.to_string()), None)
                            .await;
                    } else {
                        self.record_exhausted(context, url, attempt, e.to_string(), None)
                            .await;
                        sleep(self.config.backoff).await;
                        return Err(RetryError::Exhausted {
                            context: context.to_string(),
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                }
            }

            attempt += 1;
            sleep(self.config.backoff).await;
        }
    }

    async fn record(
        &self,
        context: &str,
        url: &str,
        status: &str,
        attempt: u32,
        error_message: Option<String>,
        response: Option<&FetchResponse>,
    ) {
        let entry = log_entry(context, url, status, attempt, error_message, response);
        if let Err(e) = self.audit.log_request(&entry).await {
            error!("Could not write request log for {}. The error: {:?}", url, e);
        }
    }

    async fn record_exhausted(
        &self,
        context: &str,
        url: &str,
        attempt: u32,
        reason: String,
        response: Option<&FetchResponse>,
    ) {
        error!(
            "{} failed after {} attempts for {}: {}",
            context, attempt, url, reason
        );
        let entry = log_entry(context, url, STATUS_FAILED, attempt, Some(reason), response);
        if let Err(e) = self.audit.log_failed_request(&entry).await {
            error!("Could not write failed request log for {}. The error: {:?}", url, e);
        }
    }
}

fn log_entry(
    context: &str,
    url: &str,
    status: &str,
    attempt: u32,
    error_message: Option<String>,
    response: Option<&FetchResponse>,
) -> NewRequestLog {
    NewRequestLog {
        context: context.to_string(),
        url: url.to_string(),
        status: status.to_string(),
        attempt_count: attempt as i32,
        error_message,
        response_code: response.map(|r| r.status as i32),
        // successful payloads land in their own tables
        response_body: response
            .filter(|r| !r.is_success())
            .and_then(|r| r.body.as_ref())
            .map(|body| truncate(&body.to_string(), LOGGED_BODY_LIMIT)),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
