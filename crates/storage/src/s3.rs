//! Amazon S3 adapter for the storage port.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use tracing::{debug, error, instrument};

use weather_common::{WeatherError, WeatherResult};

use crate::backend::{StorageBackend, StoredObject};

/// Connection settings for the S3 adapter.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// Bucket name
    pub bucket: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// AWS region
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO etc.)
    pub endpoint: Option<String>,
    /// Allow plain HTTP endpoints (local MinIO)
    pub allow_http: bool,
}

/// S3 implementation of the storage port.
///
/// Stateless aside from the client handle and bucket name; the handle
/// is created once and shared across requests.
pub struct S3Backend {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl S3Backend {
    /// Create a new S3 backend from config.
    pub fn new(config: &S3Config) -> WeatherResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if config.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder.build().map_err(|e| {
            WeatherError::StorageConfig(format!("Failed to create S3 client: {}", e))
        })?;

        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
        })
    }

    /// Build the adapter over an already-constructed store. Lets tests
    /// exercise the same error mapping against an in-memory store.
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl StorageBackend for S3Backend {
    #[instrument(skip(self, content), fields(bucket = %self.bucket, name = %name))]
    async fn upload(&self, name: &str, content: Bytes) -> bool {
        let location = Path::from(name);
        debug!(size = content.len(), "Uploading object to S3");

        match self.store.put(&location, content.into()).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Failed to upload object to S3 bucket");
                false
            }
        }
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn list(&self) -> Vec<StoredObject> {
        let mut stream = self.store.list(None);
        let mut objects = Vec::new();

        loop {
            match stream.try_next().await {
                Ok(Some(meta)) => objects.push(StoredObject {
                    name: meta.location.to_string(),
                    size: meta.size as u64,
                    created_at: Some(meta.last_modified),
                }),
                Ok(None) => break,
                Err(e) => {
                    // Listing failures are reported as an empty result,
                    // indistinguishable from an empty bucket.
                    error!(error = %e, "Failed to list objects in S3 bucket");
                    return Vec::new();
                }
            }
        }

        debug!(count = objects.len(), "Listed objects in S3 bucket");
        objects
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, name = %name))]
    async fn get(&self, name: &str) -> Option<Bytes> {
        let location = Path::from(name);

        let result = match self.store.get(&location).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                debug!("Object not found in S3 bucket");
                return None;
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch object from S3 bucket");
                return None;
            }
        };

        match result.bytes().await {
            Ok(bytes) => {
                debug!(size = bytes.len(), "Fetched object from S3 bucket");
                Some(bytes)
            }
            Err(e) => {
                error!(error = %e, "Failed to read object body from S3 bucket");
                None
            }
        }
    }
}
