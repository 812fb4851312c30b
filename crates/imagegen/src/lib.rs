//! REST client for the asynchronous image-editing provider.
//!
//! The provider works task-style: [`GenerationApi::create_task`] queues
//! an edit job and returns an opaque task id; [`TaskPoller`] then polls
//! task status until a terminal state or its attempt budget runs out.
//! There is no callback receiver in this system; polling is the only
//! completion channel.

pub mod api;
pub mod error;
pub mod poller;
pub mod responses;

pub use api::GenerationApi;
pub use error::ProviderError;
pub use poller::TaskPoller;
pub use responses::TaskState;
