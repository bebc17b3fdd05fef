//! Downloading the source document the splitter works on.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{PipelineError, Result};

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the whole document behind `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches documents over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let download = |err: reqwest::Error| PipelineError::Download(format!("{url}: {err}"));

        let response = self.client.get(url).send().await.map_err(download)?;
        let response = response.error_for_status().map_err(download)?;
        let text = response.text().await.map_err(download)?;
        debug!(url, bytes = text.len(), "downloaded document");
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Serves one fixed document, or fails every download when `None`.
    pub struct StaticSource(pub Option<&'static str>);

    #[async_trait]
    impl DocumentSource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| PipelineError::Download(format!("{url}: 404 Not Found")))
        }
    }
}
