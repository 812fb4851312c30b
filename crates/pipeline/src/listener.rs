//! Event intake: one pipeline run per `project.created` event.

use std::sync::Arc;

use renovo_db::models::project::Project;
use renovo_events::{PlatformEvent, PROJECT_CREATED};
use renovo_storage::BlobStore;
use tokio::sync::broadcast;

use crate::orchestrator::Orchestrator;
use crate::store::ProjectStore;

/// Long-lived task that dispatches `project.created` events to the
/// orchestrator.
pub struct ProjectCreatedListener;

impl ProjectCreatedListener {
    /// Run the dispatch loop.
    ///
    /// Each matching event decodes its payload into the full project
    /// record and spawns an independent pipeline run; the publisher
    /// never waits for completion. The loop exits when the bus closes.
    pub async fn run<S: ProjectStore, B: BlobStore>(
        orchestrator: Arc<Orchestrator<S, B>>,
        mut receiver: broadcast::Receiver<PlatformEvent>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) if event.event_type == PROJECT_CREATED => {
                    match serde_json::from_value::<Project>(event.payload) {
                        Ok(project) => {
                            let orchestrator = Arc::clone(&orchestrator);
                            tokio::spawn(async move {
                                orchestrator.on_project_created(project).await;
                            });
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                "Ignoring project.created event with undecodable payload",
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event listener lagged; some projects were not picked up");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed; pipeline listener shutting down");
                    break;
                }
            }
        }
    }
}
