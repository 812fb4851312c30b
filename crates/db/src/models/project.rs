//! Project entity model and DTOs.

use renovo_core::error::CoreError;
use renovo_core::status::PipelineStatus;
use renovo_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// Derives `Deserialize` as well: the full record travels as the
/// payload of `project.created` events.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub budget: Option<String>,
    pub source_image_url: Option<String>,
    /// Stored as lowercase text; see [`Project::status`].
    #[sqlx(rename = "status")]
    #[serde(rename = "status")]
    pub status_name: String,
    pub error: Option<String>,
    pub suggestions: Option<serde_json::Value>,
    pub estimated_cost: Option<i64>,
    pub estimated_value_added: Option<i64>,
    pub target_appearance: Option<String>,
    pub generated_image_url: Option<String>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Typed view of the status column.
    pub fn status(&self) -> Result<PipelineStatus, CoreError> {
        PipelineStatus::from_name(&self.status_name)
    }
}

/// DTO for creating a new project (the upload collaborator's shape;
/// used here by tests and seeding).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub room_type: Option<String>,
    pub style: Option<String>,
    pub budget: Option<String>,
    pub source_image_url: Option<String>,
}
