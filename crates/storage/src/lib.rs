//! Durable media storage for generated images.
//!
//! [`BlobStore`] is the seam the pipeline writes through: upload a
//! public object, check existence, republish, and translate between
//! keys and public URLs. [`S3Store`] is the production backend;
//! [`MemoryStore`] backs tests and local development.

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// Errors from the media storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Writing an object failed.
    #[error("Object upload failed for key '{key}': {detail}")]
    Upload { key: String, detail: String },

    /// An existence check failed (not "does not exist" — that is a
    /// normal `Ok(false)`).
    #[error("Object lookup failed for key '{key}': {detail}")]
    Lookup { key: String, detail: String },

    /// Marking an object public failed.
    #[error("Publishing object '{key}' failed: {detail}")]
    Publish { key: String, detail: String },
}

/// A durable object store holding publicly readable media.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Write bytes under `key`, marked public and non-expiring.
    /// Returns the durable public URL.
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Whether an object exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// (Re-)mark an existing object as publicly readable.
    async fn make_public(&self, key: &str) -> Result<(), StorageError>;

    /// The durable public URL for `key`.
    fn public_url(&self, key: &str) -> String;

    /// Inverse of [`public_url`](Self::public_url): extract the key
    /// from a URL this store issued, or `None` if the URL does not
    /// match this store's pattern.
    fn parse_key(&self, url: &str) -> Option<String>;
}
