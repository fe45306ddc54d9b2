//! Object storage backends for the weather archive.
//!
//! Exposes one three-operation port (upload/list/get) with
//! interchangeable adapters for Amazon S3 and Google Cloud Storage.
//! The backend is selected once at process startup and reused for the
//! process lifetime.

pub mod backend;
pub mod gcs;
pub mod s3;

pub use backend::{make_backend, BackendKind, StorageBackend, StorageSettings, StoredObject};
pub use gcs::{GcsBackend, GcsConfig};
pub use s3::{S3Backend, S3Config};
