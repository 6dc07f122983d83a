//! Where the client goes after the server has scored a prediction.
//!
//! The server answers with a location; a [`Navigator`] moves there by
//! *replacing* the current location, so the page that submitted the
//! prediction cannot be returned to.

pub mod browser;
pub mod history;
pub mod mock;
pub mod page;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can replace the current location.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn replace(&self, url: &str) -> Result<()>;
}

/// Replaces the location on every inner navigator, in order.
/// Stops at the first failure; navigators after it are left untouched, so
/// put the ones that can fail before the one that records the location.
pub struct Chain {
    navigators: Vec<Arc<dyn Navigator>>,
}

impl Chain {
    pub fn new(navigators: Vec<Arc<dyn Navigator>>) -> Self {
        Self { navigators }
    }
}

#[async_trait]
impl Navigator for Chain {
    async fn replace(&self, url: &str) -> Result<()> {
        for navigator in &self.navigators {
            navigator.replace(url).await?;
        }
        Ok(())
    }
}
