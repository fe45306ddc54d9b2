//! The storage port: the minimal interface the API service depends on.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use weather_common::WeatherResult;

use crate::gcs::{GcsBackend, GcsConfig};
use crate::s3::{S3Backend, S3Config};

/// Metadata for one stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    pub name: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Capability interface over one object-storage vendor.
///
/// Ordinary backend failures never surface as errors here: `upload`
/// reports them as `false`, `list` as an empty vec and `get` as `None`.
/// A caller therefore cannot distinguish an empty bucket from a failed
/// listing, nor a truly absent object from some classes of backend
/// fault. Adapters log the underlying error before collapsing it.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload `content` under `name`, overwriting silently if the name
    /// already exists.
    async fn upload(&self, name: &str, content: Bytes) -> bool;

    /// List every object in the bucket. Order is not guaranteed.
    async fn list(&self) -> Vec<StoredObject>;

    /// Fetch the raw bytes of one object, `None` when absent.
    async fn get(&self, name: &str) -> Option<Bytes>;
}

/// Which vendor adapter to run against. Fixed at startup; there is no
/// per-request override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Gcs,
    S3,
}

#[derive(Debug, Error)]
#[error("Unsupported storage backend: {0}")]
pub struct UnknownBackend(String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcs" => Ok(BackendKind::Gcs),
            "s3" => Ok(BackendKind::S3),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

/// Process-wide storage selection plus per-backend credentials.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub kind: BackendKind,
    pub gcs: GcsConfig,
    pub s3: S3Config,
}

/// Build the configured backend. Called once at startup; the returned
/// handle is shared across requests.
pub fn make_backend(settings: &StorageSettings) -> WeatherResult<Arc<dyn StorageBackend>> {
    match settings.kind {
        BackendKind::Gcs => Ok(Arc::new(GcsBackend::new(&settings.gcs)?)),
        BackendKind::S3 => Ok(Arc::new(S3Backend::new(&settings.s3)?)),
    }
}
