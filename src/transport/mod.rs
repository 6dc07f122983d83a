pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

use crate::consts::JSON_CONTENT_TYPE;

/// One outbound HTTP exchange, independent of the client that carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    /// Set when the request carries a body.
    pub content_type: Option<String>,
    pub body: String,
}

impl Request {
    /// A `POST` with a JSON body that has already been rendered.
    pub fn post_json(path: &str, body: String) -> Self {
        Self {
            method: "POST",
            path: path.to_string(),
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body,
        }
    }

    /// A bodiless `GET`, as a browser issues when it loads a page.
    pub fn get(path: &str) -> Self {
        Self {
            method: "GET",
            path: path.to_string(),
            content_type: None,
            body: String::new(),
        }
    }
}

/// Whatever came back, regardless of status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Status text, e.g. `"Not Found"`.
    pub reason: String,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, reason: &str, body: &str) -> Self {
        Self {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries a request to the server. `Err` means no response arrived at all.
///
/// Implementations keep whatever session state the server hands out
/// (cookies) across calls, so every exchange belongs to one session.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}
