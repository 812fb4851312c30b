//! Project persistence seam for the orchestrator.
//!
//! The orchestrator only needs the handful of guarded writes below, so
//! they sit behind a trait: production uses [`PgProjectStore`] over the
//! repository, tests use an in-memory implementation.

use renovo_core::plan::RenovationPlan;
use renovo_core::types::DbId;
use renovo_db::models::project::Project;
use renovo_db::repositories::ProjectRepo;
use renovo_db::DbPool;

/// A persistence failure, as a displayable message.
#[derive(Debug, thiserror::Error)]
#[error("Database error: {0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self(e.to_string())
    }
}

/// The project writes the pipeline performs. Every method that moves
/// `status` is a single atomic update guarded by the expected current
/// status; `Ok(false)` means the guard did not match.
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync + 'static {
    async fn find(&self, id: DbId) -> Result<Option<Project>, StoreError>;

    /// `unset -> processing`.
    async fn mark_processing(&self, id: DbId) -> Result<bool, StoreError>;

    /// `unset -> failed`, recording the validation error.
    async fn mark_failed(&self, id: DbId, error: &str) -> Result<bool, StoreError>;

    /// `processing -> generating_image`, writing the full analysis.
    async fn record_analysis(&self, id: DbId, plan: &RenovationPlan) -> Result<bool, StoreError>;

    /// `generating_image -> completed`, writing the image outcome.
    async fn record_outcome(
        &self,
        id: DbId,
        generated_image_url: &str,
        error: Option<&str>,
    ) -> Result<bool, StoreError>;

    /// Repair: overwrite the generated-image URL.
    async fn set_generated_image_url(&self, id: DbId, url: &str) -> Result<bool, StoreError>;
}

/// Postgres-backed [`ProjectStore`].
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for PgProjectStore {
    async fn find(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn mark_processing(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProjectRepo::mark_processing(&self.pool, id).await?)
    }

    async fn mark_failed(&self, id: DbId, error: &str) -> Result<bool, StoreError> {
        Ok(ProjectRepo::mark_failed(&self.pool, id, error).await?)
    }

    async fn record_analysis(&self, id: DbId, plan: &RenovationPlan) -> Result<bool, StoreError> {
        let suggestions = serde_json::to_value(&plan.suggestions)
            .map_err(|e| StoreError(format!("failed to serialize suggestions: {e}")))?;
        Ok(ProjectRepo::record_analysis(
            &self.pool,
            id,
            &suggestions,
            plan.estimated_cost,
            plan.estimated_value_added,
            &plan.target_appearance,
        )
        .await?)
    }

    async fn record_outcome(
        &self,
        id: DbId,
        generated_image_url: &str,
        error: Option<&str>,
    ) -> Result<bool, StoreError> {
        Ok(ProjectRepo::record_outcome(&self.pool, id, generated_image_url, error).await?)
    }

    async fn set_generated_image_url(&self, id: DbId, url: &str) -> Result<bool, StoreError> {
        Ok(ProjectRepo::set_generated_image_url(&self.pool, id, url).await?)
    }
}
