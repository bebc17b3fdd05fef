//! In-process [`ObjectStore`](super::ObjectStore) for tests and the standalone binary.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::trace;

use super::{ObjectStore, StoreError};

#[derive(Debug, Clone)]
struct Blob {
    body: Bytes,
    content_type: String,
}

/// An [`ObjectStore`] that lives in process memory.
///
/// Clones share the same objects, so one instance can back several stages.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<HashMap<(String, String), Blob>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let objects = self.objects.read().await;
        let mut keys: Vec<String> = objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub async fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|blob| blob.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        trace!(bucket, key, "memory get");
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|blob| blob.body.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        trace!(bucket, key, bytes = body.len(), "memory put");
        let mut objects = self.objects.write().await;
        objects.insert(
            (bucket.to_string(), key.to_string()),
            Blob {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
