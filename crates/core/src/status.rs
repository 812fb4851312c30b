//! Project pipeline status enum and transition validation.
//!
//! The `projects.status` column stores these values as lowercase text.
//! The pipeline only ever takes the documented transitions, but
//! [`PipelineStatus::can_transition`] rejects illegal ones defensively
//! so orchestrator bugs surface as logged errors instead of silently
//! corrupted records.

use crate::error::CoreError;

/// Lifecycle status of a project's generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Freshly created by the upload collaborator; pipeline not started.
    Unset,
    /// Inputs validated, suggestion analysis underway.
    Processing,
    /// Analysis written; image generation in flight.
    GeneratingImage,
    /// Terminal. Image set, or fallback marker + error recorded.
    Completed,
    /// Terminal. Reserved for projects with missing required inputs.
    Failed,
}

impl PipelineStatus {
    /// Database text value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Processing => "processing",
            Self::GeneratingImage => "generating_image",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "unset" => Ok(Self::Unset),
            "processing" => Ok(Self::Processing),
            "generating_image" => Ok(Self::GeneratingImage),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown pipeline status '{other}'"
            ))),
        }
    }

    /// Whether `self -> next` is a legal pipeline transition.
    ///
    /// `failed` is only reachable from `unset` (missing inputs);
    /// image-step failures still land in `completed` with a fallback
    /// image and a recorded error.
    pub fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unset, Self::Processing)
                | (Self::Unset, Self::Failed)
                | (Self::Processing, Self::GeneratingImage)
                | (Self::GeneratingImage, Self::Completed)
        )
    }

    /// True for states from which no further transition occurs.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
