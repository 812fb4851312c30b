//! Aggregate pipeline error.
//!
//! Variants are `transparent`: the orchestrator records
//! `err.to_string()` on the project, and that string must be the
//! originating error's message verbatim, not a re-wrapped kind.

use renovo_imagegen::ProviderError;
use renovo_secrets::SecretError;

use crate::materialize::MaterializeError;

/// Any failure inside the image step of one pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Credential resolution failed. Process-fatal for this run: the
    /// image step aborts before any submission attempt.
    #[error(transparent)]
    Credential(#[from] SecretError),

    /// Submission or polling failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Downloading or storing the finished artifact failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}
