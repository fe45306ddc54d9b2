//! Google Cloud Storage adapter for the storage port.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{gcp::GoogleCloudStorageBuilder, path::Path, ObjectStore};
use tracing::{debug, error, instrument};

use weather_common::{WeatherError, WeatherResult};

use crate::backend::{StorageBackend, StoredObject};

/// Connection settings for the GCS adapter.
#[derive(Debug, Clone, Default)]
pub struct GcsConfig {
    /// Bucket name
    pub bucket: String,
    /// Path to a service account JSON key. When unset the client falls
    /// back to ambient application-default credentials.
    pub service_account_path: Option<String>,
}

/// GCS implementation of the storage port.
pub struct GcsBackend {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl GcsBackend {
    /// Create a new GCS backend from config.
    pub fn new(config: &GcsConfig) -> WeatherResult<Self> {
        let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(&config.bucket);

        if let Some(path) = &config.service_account_path {
            builder = builder.with_service_account_path(path);
        }

        let store = builder.build().map_err(|e| {
            WeatherError::StorageConfig(format!("Failed to create GCS client: {}", e))
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
impl StorageBackend for GcsBackend {
    #[instrument(skip(self, content), fields(bucket = %self.bucket, name = %name))]
    async fn upload(&self, name: &str, content: Bytes) -> bool {
        let location = Path::from(name);
        debug!(size = content.len(), "Uploading object to GCS");

        match self.store.put(&location, content.into()).await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Failed to upload object to GCS bucket");
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
                    error!(error = %e, "Failed to list objects in GCS bucket");
                    return Vec::new();
                }
            }
        }

        debug!(count = objects.len(), "Listed objects in GCS bucket");
        objects
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, name = %name))]
    async fn get(&self, name: &str) -> Option<Bytes> {
        let location = Path::from(name);

        let result = match self.store.get(&location).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                debug!("Object not found in GCS bucket");
                return None;
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch object from GCS bucket");
                return None;
            }
        };

        match result.bytes().await {
            Ok(bytes) => {
                debug!(size = bytes.len(), "Fetched object from GCS bucket");
                Some(bytes)
            }
            Err(e) => {
                error!(error = %e, "Failed to read object body from GCS bucket");
                None
            }
        }
    }
}
