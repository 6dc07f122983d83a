use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::Navigator;
use crate::transport::{Request, Transport};

/// Loads each new location from the server, the way a browser fetches the
/// page it navigates to.
///
/// The server moves its per-session state forward when a page is loaded,
/// so this must share a [`Transport`] with the predictor.
pub struct PageLoader {
    transport: Arc<dyn Transport>,
}

impl PageLoader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET` the page at `url`. Fails unless the server answers 2xx.
    pub async fn load(&self, url: &str) -> Result<()> {
        debug!(url, "loading page");
        let response = self
            .transport
            .send(Request::get(url))
            .await
            .with_context(|| format!("failed to load {url}"))?;
        if !response.is_success() {
            bail!("{url} answered {} {}", response.status, response.reason);
        }
        Ok(())
    }
}

#[async_trait]
impl Navigator for PageLoader {
    async fn replace(&self, url: &str) -> Result<()> {
        self.load(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Response;
    use crate::transport::mock::MockTransport;

    #[tokio::test]
    async fn replace_issues_a_get() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(200, "OK", "<html>")]));
        let loader = PageLoader::new(transport.clone());

        loader.replace("/2").await.unwrap();

        assert_eq!(transport.requests(), vec![Request::get("/2")]);
    }

    #[tokio::test]
    async fn error_status_fails_the_load() {
        let transport = Arc::new(MockTransport::new(vec![Response::new(
            500,
            "Internal Server Error",
            "",
        )]));
        let loader = PageLoader::new(transport);

        let err = loader.load("/7").await.unwrap_err();
        assert!(err.to_string().contains("/7 answered 500"));
    }

    #[tokio::test]
    async fn no_response_fails_the_load() {
        let loader = PageLoader::new(Arc::new(MockTransport::unreachable("refused")));
        let err = loader.load("/").await.unwrap_err();
        assert!(format!("{err:#}").contains("refused"));
    }
}
