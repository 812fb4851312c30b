//! In-process event infrastructure.
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope. The
//!   pipeline listens for `project.created`.

pub mod bus;

pub use bus::{EventBus, PlatformEvent, PROJECT_CREATED};
