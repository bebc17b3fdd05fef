//! The object store every stage reads from and writes to.
//!
//! Stages only ever `get` and `put` whole blobs addressed by bucket and key.
//! Buckets are provisioned outside the pipeline.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::{S3Settings, S3Store};

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("failed to read {bucket}/{key}: {reason}")]
    Get {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("failed to write {bucket}/{key}: {reason}")]
    Put {
        bucket: String,
        key: String,
        reason: String,
    },
}

/// A key/value blob service.
///
/// A `put` fully replaces any existing object under the same key, and a `get`
/// that follows it is expected to see the new body.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError>;
}
