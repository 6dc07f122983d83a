use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::Navigator;

/// Opens the new location in the system browser.
///
/// The browser owns its own history, so this cannot guarantee the previous
/// page is dropped; pair it with a [`SessionHistory`](super::history::SessionHistory)
/// for that.
pub struct BrowserNavigator {
    base: Url,
}

impl BrowserNavigator {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
        Ok(Self { base })
    }

    /// Server replies usually carry a path such as `/3`; resolve it the way
    /// the page that made the request would.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        self.base
            .join(url)
            .with_context(|| format!("cannot resolve {url} against {}", self.base))
    }
}

#[async_trait]
impl Navigator for BrowserNavigator {
    async fn replace(&self, url: &str) -> Result<()> {
        let target = self.resolve(url)?;
        debug!(%target, "opening in browser");
        open::that(target.as_str()).with_context(|| format!("failed to open {target}"))?;
        Ok(())
    }
}
