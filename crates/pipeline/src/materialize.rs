//! Result materialization: copy a provider-hosted (ephemeral) result
//! into our own durable, publicly readable storage.

use renovo_core::types::DbId;
use renovo_storage::{BlobStore, StorageError};

use crate::fetch::{fetch_image, FetchError};

/// Why materialization failed. Both variants render with the same
/// prefix; the caller records the message and decides fallback
/// behavior. Nothing partial is persisted here.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("Materialization failed: {0}")]
    Download(#[from] FetchError),

    #[error("Materialization failed: {0}")]
    Store(#[from] StorageError),
}

/// Download `result_url` and persist it under the project's namespace.
///
/// The key carries a millisecond timestamp so a retried pipeline run
/// never collides with an earlier object. Returns the durable public
/// URL.
pub async fn materialize<B: BlobStore>(
    http: &reqwest::Client,
    store: &B,
    project_id: DbId,
    result_url: &str,
) -> Result<String, MaterializeError> {
    let (bytes, content_type) = fetch_image(http, result_url).await?;
    let key = object_key(project_id, &content_type, chrono::Utc::now().timestamp_millis());
    let stored_url = store.put_public(&key, bytes, &content_type).await?;
    Ok(stored_url)
}

/// Storage key for a generated image: namespaced by project id,
/// distinguished by timestamp.
pub fn object_key(project_id: DbId, content_type: &str, millis: i64) -> String {
    format!(
        "projects/{project_id}/renovated-{millis}.{}",
        extension_for(content_type)
    )
}

/// File extension for a handful of image content types.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        _ => "img",
    }
}
