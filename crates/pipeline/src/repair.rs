//! Manual repair: re-issue the durable public URL for a project's
//! generated image.
//!
//! Used when a stored URL has stopped resolving (e.g. the object lost
//! its public grant). The storage key is re-derived from the stored
//! URL *before* any object-store call, the object is verified and
//! republished, and the fresh URL is written back. Running it against
//! an already-correct record is a no-op that returns the same URL.

use renovo_core::types::DbId;
use renovo_storage::{BlobStore, StorageError};

use crate::store::{ProjectStore, StoreError};

/// Why a repair was refused or failed.
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    #[error("Repair failed: project {0} not found")]
    MissingProject(DbId),

    #[error("Repair failed: project {0} has no stored generated-image URL")]
    NoStoredUrl(DbId),

    /// The stored URL does not match the media store's URL pattern.
    /// Raised before any object-store call is made.
    #[error("Repair failed: URL '{url}' does not match the media storage URL pattern")]
    UnrecognizedUrl { url: String },

    #[error("Repair failed: object '{key}' does not exist in media storage")]
    ObjectMissing { key: String },

    #[error("Repair failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Repair failed: {0}")]
    Db(#[from] StoreError),
}

/// Re-derive, verify, republish, and persist the generated-image URL
/// for one project. Returns the fresh durable URL.
pub async fn fix_generated_image_url<S: ProjectStore, B: BlobStore>(
    store: &S,
    blobs: &B,
    project_id: DbId,
) -> Result<String, RepairError> {
    let project = store
        .find(project_id)
        .await?
        .ok_or(RepairError::MissingProject(project_id))?;

    let stored_url = project
        .generated_image_url
        .ok_or(RepairError::NoStoredUrl(project_id))?;

    let key = blobs
        .parse_key(&stored_url)
        .ok_or(RepairError::UnrecognizedUrl { url: stored_url })?;

    if !blobs.exists(&key).await? {
        return Err(RepairError::ObjectMissing { key });
    }

    blobs.make_public(&key).await?;
    let fresh_url = blobs.public_url(&key);
    store.set_generated_image_url(project_id, &fresh_url).await?;

    tracing::info!(project_id, key = %key, url = %fresh_url, "Generated-image URL repaired");
    Ok(fresh_url)
}
