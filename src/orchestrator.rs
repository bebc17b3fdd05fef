//! Drives the stages over HTTP in the order the pipeline needs.
//!
//! The stages have no way to tell whether their inputs exist yet, so the
//! orchestrator only calls the mapper after the splitter has answered and
//! the reducer after every mapper has answered. Nothing is retried: the
//! first failing call fails the whole run.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use futures::future::try_join_all;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::stage::{MapBody, MapResponse, ReduceBody, ReduceResponse, SplitBody, SplitResponse};

/// Base URLs of the three stage services, e.g. `http://splitter:8080`.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub splitter: String,
    pub mapper: String,
    pub reducer: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct Orchestrator {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl Orchestrator {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, endpoints })
    }

    pub async fn split(&self, url: &str) -> Result<SplitResponse> {
        let body = SplitBody {
            url: Some(url.to_string()),
        };
        self.post(&self.endpoints.splitter, "split", &body).await
    }

    pub async fn map(&self, bucket: &str, key: &str) -> Result<MapResponse> {
        let body = MapBody {
            bucket: Some(bucket.to_string()),
            key: Some(key.to_string()),
        };
        self.post(&self.endpoints.mapper, "map", &body).await
    }

    pub async fn reduce(&self, bucket: &str, files: Vec<String>) -> Result<ReduceResponse> {
        let body = ReduceBody {
            bucket: Some(bucket.to_string()),
            files: Some(files),
        };
        self.post(&self.endpoints.reducer, "reduce", &body).await
    }

    /// Splits `url`, maps every partition concurrently, then reduces the
    /// word counts in partition order.
    pub async fn run(&self, url: &str) -> Result<ReduceResponse> {
        let split = self.split(url).await?;
        info!(bucket = %split.bucket, partitions = split.files.len(), "split finished");

        let mapped = try_join_all(split.files.iter().map(|key| self.map(&split.bucket, key))).await?;
        info!(partitions = mapped.len(), "map finished");

        let files = mapped.into_iter().map(|m| m.key).collect();
        let reduced = self.reduce(&split.bucket, files).await?;
        info!(
            key = %reduced.key,
            total_unique_words = reduced.total_unique_words,
            "reduce finished"
        );
        Ok(reduced)
    }

    async fn post<B, R>(&self, base: &str, route: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", base.trim_end_matches('/'), route);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(ErrorBody { error }) => error,
                Err(_) => "no error message".to_string(),
            };
            return Err(anyhow!("POST {url} returned {status}: {message}"));
        }

        response
            .json::<R>()
            .await
            .with_context(|| format!("POST {url} returned an unexpected body"))
    }
}
