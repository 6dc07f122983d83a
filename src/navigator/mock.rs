use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::Navigator;

/// Records every replacement instead of going anywhere. For tests.
#[derive(Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL passed to [`Navigator::replace`], oldest first.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }

    /// The most recent replacement, if any.
    pub fn location(&self) -> Option<String> {
        self.targets.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn replace(&self, url: &str) -> Result<()> {
        self.targets.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
