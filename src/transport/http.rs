use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use tracing::debug;

use super::{Request, Response, Transport};

/// Sends requests over HTTP to a single server.
///
/// Cookies the server sets are kept for the life of the transport, so page
/// loads and predictions share one server-side session.
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Paths in requests are resolved against `base_url` the way a browser
    /// resolves an absolute path against the current page.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("cannot resolve {path} against {}", self.base))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let url = self.endpoint(&request.path)?;
        let method = Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("invalid HTTP method: {}", request.method))?;

        debug!(%method, %url, body = %request.body, "sending request");

        let mut builder = self.client.request(method, url.clone());
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type).body(request.body);
        }
        let resp = builder
            .send()
            .await
            .with_context(|| format!("no response from {url}"))?;

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = resp
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;

        Ok(Response {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}
