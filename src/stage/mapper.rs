//! `POST /map`: count the words of one stored partition.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{ObjectStore, APPLICATION_JSON};
use crate::utils::string_from_bytes;
use crate::workload::wc;
use crate::{result_key, PipelineError, Result};

use super::SUCCESS;

/// Body of `POST /map` as received.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MapBody {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRequest {
    pub bucket: String,
    pub key: String,
    /// Where the word count goes, derived from `key`.
    pub output_key: String,
}

impl TryFrom<MapBody> for MapRequest {
    type Error = PipelineError;

    fn try_from(body: MapBody) -> Result<Self> {
        let (Some(bucket), Some(key)) = (body.bucket, body.key) else {
            return Err(PipelineError::validation(
                "Please provide \"bucket\" and \"key\"",
            ));
        };
        let output_key = result_key(&key).ok_or_else(|| {
            PipelineError::validation(format!("partition key {key:?} must end in \".txt\""))
        })?;
        Ok(Self {
            bucket,
            key,
            output_key,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapResponse {
    pub message: String,
    pub bucket: String,
    pub key: String,
}

/// Counts the words of one partition.
pub struct Mapper {
    store: Arc<dyn ObjectStore>,
}

impl Mapper {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub async fn map(&self, request: MapRequest) -> Result<MapResponse> {
        let MapRequest {
            bucket,
            key,
            output_key,
        } = request;
        info!(bucket = %bucket, key = %key, "processing partition");

        let body = self.store.get(&bucket, &key).await?;
        let text = string_from_bytes(body).map_err(|err| PipelineError::malformed(&key, err))?;

        let counts = wc::count_words(&text);
        info!(key = %key, unique_words = counts.len(), "counted words");

        let encoded = serde_json::to_vec(&counts)?;
        info!(key = %output_key, "uploading word count");
        self.store
            .put(&bucket, &output_key, Bytes::from(encoded), APPLICATION_JSON)
            .await?;

        Ok(MapResponse {
            message: SUCCESS.to_string(),
            bucket,
            key: output_key,
        })
    }
}
