//! In-memory backend for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{BlobStore, StorageError};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
    public: bool,
}

/// A [`BlobStore`] held entirely in memory. Counts operations so tests
/// can assert on write/publish behavior (e.g. repair idempotence).
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
    publishes: AtomicUsize,
    lookups: AtomicUsize,
}

/// Base URL used for issued object URLs.
const BASE_URL: &str = "https://media.renovo.test";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly (bypasses the put counter).
    pub fn seed(&self, key: &str, bytes: Vec<u8>, content_type: &str, public: bool) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                public,
            },
        );
    }

    /// Number of `put_public` calls so far.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `make_public` calls so far.
    pub fn publish_count(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }

    /// Number of `exists` calls so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Whether the object under `key` is marked public.
    pub fn is_public(&self, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| o.public)
            .unwrap_or(false)
    }

    /// Content type recorded for `key`, if stored.
    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| o.content_type.clone())
    }

    /// Stored bytes for `key`, if stored.
    pub fn bytes_of(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).map(|o| o.bytes.clone())
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryStore {
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                public: true,
            },
        );
        Ok(self.public_url(key))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn make_public(&self, key: &str) -> Result<(), StorageError> {
        self.publishes.fetch_add(1, Ordering::SeqCst);
        let mut objects = self.objects.lock().unwrap();
        match objects.get_mut(key) {
            Some(object) => {
                object.public = true;
                Ok(())
            }
            None => Err(StorageError::Publish {
                key: key.to_string(),
                detail: "object does not exist".to_string(),
            }),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{BASE_URL}/{key}")
    }

    fn parse_key(&self, url: &str) -> Option<String> {
        let key = url.strip_prefix(&format!("{BASE_URL}/"))?;
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }
}
