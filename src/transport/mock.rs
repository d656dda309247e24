//! Scripted fetcher for tests.

use super::{FetchResponse, Fetcher, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(u16, Option<Value>),
    Timeout,
}

impl MockReply {
    pub fn ok(body: Value) -> Self {
        MockReply::Respond(200, Some(body))
    }

    pub fn status(status: u16) -> Self {
        MockReply::Respond(status, None)
    }
}

/// Replies are queued per URL; the last reply for a URL repeats once the queue drains.
/// Unknown URLs answer 404 with no body.
#[derive(Default)]
pub struct MockFetcher {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, url: &str, reply: MockReply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == url).count()
    }

    fn next_reply(&self, url: &str) -> MockReply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(MockReply::status(404)),
            None => MockReply::status(404),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_json(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.next_reply(url) {
            MockReply::Respond(status, body) => Ok(FetchResponse::new(status, body)),
            MockReply::Timeout => Err(TransportError::Timeout(Duration::from_millis(1))),
        }
    }
}
