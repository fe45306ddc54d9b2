//! Contract tests for the storage port, run against both adapters over
//! an in-memory object store.

use std::collections::BTreeSet;
use std::sync::Arc;

use bytes::Bytes;
use object_store::memory::InMemory;

use storage::{GcsBackend, S3Backend, StorageBackend};

fn backends() -> Vec<Box<dyn StorageBackend>> {
    vec![
        Box::new(S3Backend::with_store(Arc::new(InMemory::new()), "test-bucket")),
        Box::new(GcsBackend::with_store(Arc::new(InMemory::new()), "test-bucket")),
    ]
}

#[tokio::test]
async fn upload_then_get_returns_identical_bytes() {
    for backend in backends() {
        let content = Bytes::from_static(b"{\"daily\":{\"time\":[\"2024-01-01\"]}}");

        assert!(backend.upload("weather_10_20.json", content.clone()).await);

        let fetched = backend.get("weather_10_20.json").await.unwrap();
        assert_eq!(fetched, content);
    }
}

#[tokio::test]
async fn get_missing_object_returns_none() {
    for backend in backends() {
        assert!(backend.get("does-not-exist.json").await.is_none());
    }
}

#[tokio::test]
async fn upload_overwrites_existing_name() {
    for backend in backends() {
        assert!(backend.upload("same.json", Bytes::from_static(b"first")).await);
        assert!(backend.upload("same.json", Bytes::from_static(b"second")).await);

        let fetched = backend.get("same.json").await.unwrap();
        assert_eq!(fetched, Bytes::from_static(b"second"));

        // overwrite must not create a second object
        assert_eq!(backend.list().await.len(), 1);
    }
}

#[tokio::test]
async fn list_reports_names_and_sizes() {
    for backend in backends() {
        backend.upload("a.json", Bytes::from_static(b"12345")).await;
        backend.upload("b.json", Bytes::from_static(b"123")).await;

        let mut objects = backend.list().await;
        objects.sort_by(|x, y| x.name.cmp(&y.name));

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "a.json");
        assert_eq!(objects[0].size, 5);
        assert_eq!(objects[1].name, "b.json");
        assert_eq!(objects[1].size, 3);
    }
}

#[tokio::test]
async fn list_twice_without_writes_is_stable() {
    for backend in backends() {
        backend.upload("x.json", Bytes::from_static(b"x")).await;
        backend.upload("y.json", Bytes::from_static(b"y")).await;

        let first: BTreeSet<String> = backend.list().await.into_iter().map(|o| o.name).collect();
        let second: BTreeSet<String> = backend.list().await.into_iter().map(|o| o.name).collect();

        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn list_empty_bucket_returns_empty_vec() {
    for backend in backends() {
        assert!(backend.list().await.is_empty());
    }
}
