//! The image-generation orchestration pipeline.
//!
//! One [`Orchestrator`] run per `project.created` event: validate
//! inputs, write the deterministic renovation analysis, then submit /
//! poll / materialize the renovated image and reconcile the outcome
//! into the project record. Image-step failures never surface to the
//! triggering caller — they are recorded on the project and the record
//! still reaches its terminal state.

pub mod config;
pub mod error;
pub mod fetch;
pub mod listener;
pub mod materialize;
pub mod orchestrator;
pub mod repair;
pub mod store;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use listener::ProjectCreatedListener;
pub use orchestrator::{Orchestrator, FALLBACK_GENERATED_IMAGE};
pub use store::{PgProjectStore, ProjectStore, StoreError};
