//! [`ObjectStore`](super::ObjectStore) over S3 or an S3-compatible server such as MinIO.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::{Builder, Credentials};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::{info, trace};

use super::{ObjectStore, StoreError};

/// How to reach the S3-compatible store.
#[derive(Debug, Clone)]
pub struct S3Settings {
    /// Custom endpoint, e.g. a MinIO server. `None` means AWS itself.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: String,
    /// Upper bound for every single get or put.
    pub timeout: Duration,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key: None,
            secret_key: None,
            region: "us-east-1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// An [`ObjectStore`] backed by `aws-sdk-s3`.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from `settings`, falling back to the usual AWS
    /// environment for anything left unset.
    pub async fn connect(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(settings.timeout)
                    .build(),
            );

        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let (Some(id), Some(secret)) = (&settings.access_key, &settings.secret_key) {
            let credentials = Credentials::new(id, secret, None, None, "mrpipe");
            loader = loader.credentials_provider(credentials);
        }

        let shared = loader.load().await;
        // MinIO and friends want path-style bucket addressing.
        let config = Builder::from(&shared)
            .force_path_style(settings.endpoint.is_some())
            .build();

        info!(
            endpoint = settings.endpoint.as_deref().unwrap_or("aws"),
            region = %settings.region,
            "connected object store"
        );
        Self::new(Client::from_conf(config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        trace!("bucket:      {}", bucket);
        trace!("object:      {}", key);
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    StoreError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StoreError::Get {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        reason: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Get {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: err.to_string(),
            })?
            .into_bytes();
        trace!(bytes = body.len(), "read object");
        Ok(body)
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        trace!(bucket, key, bytes = body.len(), "put object");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| StoreError::Put {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }
}
