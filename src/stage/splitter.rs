//! `POST /split`: download a document and store it as line partitions.

use std::num::NonZeroUsize;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::source::DocumentSource;
use crate::store::{ObjectStore, TEXT_PLAIN};
use crate::workload::split;
use crate::{partition_key, PipelineError, Result};

use super::SUCCESS;

/// Body of `POST /split` as received.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SplitBody {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub url: String,
}

impl TryFrom<SplitBody> for SplitRequest {
    type Error = PipelineError;

    fn try_from(body: SplitBody) -> Result<Self> {
        let url = body
            .url
            .ok_or_else(|| PipelineError::validation("Please provide a \"url\" in the JSON body"))?;
        Ok(Self { url })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    pub message: String,
    pub bucket: String,
    /// Partition keys in partition order.
    pub files: Vec<String>,
}

/// Downloads a document and writes it back as numbered partitions.
pub struct Splitter {
    store: Arc<dyn ObjectStore>,
    source: Arc<dyn DocumentSource>,
    bucket: String,
    partitions: NonZeroUsize,
}

impl Splitter {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        source: Arc<dyn DocumentSource>,
        bucket: impl Into<String>,
        partitions: NonZeroUsize,
    ) -> Self {
        Self {
            store,
            source,
            bucket: bucket.into(),
            partitions,
        }
    }

    pub async fn split(&self, request: SplitRequest) -> Result<SplitResponse> {
        info!(url = %request.url, "downloading source document");
        let text = self.source.fetch(&request.url).await?;

        let parts = split::partition(&text, self.partitions);
        info!(
            bytes = text.len(),
            partitions = parts.len(),
            "split document"
        );

        let mut files = Vec::with_capacity(parts.len());
        for (i, part) in parts.into_iter().enumerate() {
            let key = partition_key(i + 1);
            info!(bucket = %self.bucket, key = %key, bytes = part.len(), "uploading partition");
            self.store
                .put(&self.bucket, &key, Bytes::from(part), TEXT_PLAIN)
                .await?;
            files.push(key);
        }

        Ok(SplitResponse {
            message: SUCCESS.to_string(),
            bucket: self.bucket.clone(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::StaticSource;
    use crate::store::MemoryStore;

    fn splitter(store: &MemoryStore, doc: Option<&'static str>) -> Splitter {
        Splitter::new(
            Arc::new(store.clone()),
            Arc::new(StaticSource(doc)),
            "docs",
            NonZeroUsize::new(3).unwrap(),
        )
    }

    fn request() -> SplitRequest {
        SplitRequest {
            url: "http://example.test/doc.txt".to_string(),
        }
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = SplitRequest::try_from(SplitBody::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[tokio::test]
    async fn writes_numbered_partitions() {
        let store = MemoryStore::new();
        let response = splitter(&store, Some("one\ntwo\nthree\nfour"))
            .split(request())
            .await
            .unwrap();

        assert_eq!(response.message, "Success");
        assert_eq!(response.bucket, "docs");
        assert_eq!(response.files, vec!["split_1.txt", "split_2.txt", "split_3.txt"]);
        assert_eq!(store.get("docs", "split_1.txt").await.unwrap(), "one\ntwo");
        assert_eq!(store.get("docs", "split_2.txt").await.unwrap(), "three\nfour");
        assert_eq!(store.get("docs", "split_3.txt").await.unwrap(), "");
        assert_eq!(
            store.content_type("docs", "split_1.txt").await.as_deref(),
            Some(TEXT_PLAIN)
        );
    }

    #[tokio::test]
    async fn download_failure_writes_nothing() {
        let store = MemoryStore::new();
        let err = splitter(&store, None).split(request()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Download(_)));
        assert!(store.keys("docs").await.is_empty());
    }
}
