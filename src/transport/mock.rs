use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Request, Response, Transport};

/// A scripted transport for tests. Replies with pre-defined outcomes in
/// order and records every request it was handed.
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Response, String>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new(replies: Vec<Response>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A transport whose single exchange never gets a response.
    pub fn unreachable(reason: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(reason.to_string())])),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(anyhow!(reason)),
            None => Err(anyhow!("MockTransport: no more replies (called {n} times)")),
        }
    }
}
