//! Repository for the `projects` table.
//!
//! Every pipeline state transition is one guarded UPDATE statement
//! (`WHERE id = $1 AND status = $expected`), so each external-facing
//! transition is a single atomic write and an out-of-order caller
//! simply affects zero rows.

use renovo_core::status::PipelineStatus;
use renovo_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, room_type, style, budget, source_image_url, status, error, \
     suggestions, estimated_cost, estimated_value_added, target_appearance, \
     generated_image_url, processed_at, created_at, updated_at";

/// Provides persistence operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with only input columns populated.
    ///
    /// Production rows are created by the upload collaborator; this is
    /// used by tests and seeding.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (room_type, style, budget, source_image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.room_type)
            .bind(&input.style)
            .bind(&input.budget)
            .bind(&input.source_image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `unset -> processing`. Returns `false` if the project was not in
    /// `unset` (or does not exist).
    pub async fn mark_processing(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(PipelineStatus::Unset.name())
        .bind(PipelineStatus::Processing.name())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `unset -> failed` with the validation error recorded. Reserved
    /// for missing-input projects.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status = $3, error = $4, updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(PipelineStatus::Unset.name())
        .bind(PipelineStatus::Failed.name())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `processing -> generating_image`, writing the full analysis in
    /// the same statement so UI consumers never observe a partial
    /// analysis.
    pub async fn record_analysis(
        pool: &PgPool,
        id: DbId,
        suggestions: &serde_json::Value,
        estimated_cost: i64,
        estimated_value_added: i64,
        target_appearance: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET
                status = $3,
                suggestions = $4,
                estimated_cost = $5,
                estimated_value_added = $6,
                target_appearance = $7,
                updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(PipelineStatus::Processing.name())
        .bind(PipelineStatus::GeneratingImage.name())
        .bind(suggestions)
        .bind(estimated_cost)
        .bind(estimated_value_added)
        .bind(target_appearance)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `generating_image -> completed`, writing the image outcome
    /// (real URL or fallback marker), the error text if any, and the
    /// processed timestamp in one statement.
    pub async fn record_outcome(
        pool: &PgPool,
        id: DbId,
        generated_image_url: &str,
        error: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET
                status = $3,
                generated_image_url = $4,
                error = $5,
                processed_at = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(PipelineStatus::GeneratingImage.name())
        .bind(PipelineStatus::Completed.name())
        .bind(generated_image_url)
        .bind(error)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the generated-image URL (repair operation; no status
    /// guard, the project is already terminal).
    pub async fn set_generated_image_url(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET generated_image_url = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
