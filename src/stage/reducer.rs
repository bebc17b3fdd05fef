//! `POST /reduce`: merge word counts into one ranked result.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{ObjectStore, APPLICATION_JSON};
use crate::workload::wc::{Aggregate, WordCount};
use crate::{PipelineError, Result, FINAL_RESULT_KEY};

use super::SUCCESS;

/// Body of `POST /reduce` as received.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReduceBody {
    pub bucket: Option<String>,
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceRequest {
    pub bucket: String,
    /// Word count keys. Duplicates are merged once per occurrence.
    pub files: Vec<String>,
}

impl TryFrom<ReduceBody> for ReduceRequest {
    type Error = PipelineError;

    fn try_from(body: ReduceBody) -> Result<Self> {
        match (body.bucket, body.files) {
            (Some(bucket), Some(files)) => Ok(Self { bucket, files }),
            _ => Err(PipelineError::validation(
                "Please provide \"bucket\" and a list of \"files\"",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceResponse {
    pub message: String,
    pub bucket: String,
    pub key: String,
    pub total_unique_words: usize,
}

/// Merges word counts into the final ranked result.
pub struct Reducer {
    store: Arc<dyn ObjectStore>,
}

impl Reducer {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Reads every input before writing anything, so a failed fetch or an
    /// overflowing total leaves no aggregate behind.
    pub async fn reduce(&self, request: ReduceRequest) -> Result<ReduceResponse> {
        let ReduceRequest { bucket, files } = request;
        info!(bucket = %bucket, files = files.len(), "starting reduction");

        let mut aggregate = Aggregate::new();
        for key in &files {
            info!(key = %key, "merging word count");
            let body = self.store.get(&bucket, key).await?;
            let counts: WordCount =
                serde_json::from_slice(&body).map_err(|err| PipelineError::malformed(key, err))?;
            aggregate
                .add(counts)
                .map_err(|err| PipelineError::malformed(key, err))?;
        }

        let total_unique_words = aggregate.unique_words();
        info!(total_unique_words, "reduction complete");

        let ranking = aggregate.into_ranking();
        let encoded = serde_json::to_vec_pretty(&ranking)?;
        info!(key = FINAL_RESULT_KEY, "uploading final result");
        self.store
            .put(&bucket, FINAL_RESULT_KEY, Bytes::from(encoded), APPLICATION_JSON)
            .await?;

        Ok(ReduceResponse {
            message: SUCCESS.to_string(),
            bucket,
            key: FINAL_RESULT_KEY.to_string(),
            total_unique_words,
        })
    }
}
