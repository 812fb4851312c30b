//! Pipeline orchestrator: the state machine for one project run.
//!
//! Driven by one upload-completion event per project. The analysis
//! write is durable before the image step begins, so UI consumers see
//! suggestions even while generation is still running or after it has
//! failed. Image-step errors are caught here and written into the
//! project record — nothing propagates to the triggering caller.

use std::sync::{Arc, Mutex};

use renovo_core::cache::BoundedCache;
use renovo_core::plan::{build_plan, RenovationPlan};
use renovo_core::prompt;
use renovo_core::status::PipelineStatus;
use renovo_core::types::DbId;
use renovo_db::models::project::Project;
use renovo_imagegen::{GenerationApi, TaskPoller};
use renovo_secrets::SecretResolver;
use renovo_storage::BlobStore;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::materialize::materialize;
use crate::store::ProjectStore;

/// Marker written to `generated_image_url` when generation fails.
/// The UI renders this placeholder together with the recorded error
/// text instead of hanging on a perpetually processing record.
pub const FALLBACK_GENERATED_IMAGE: &str = "/assets/renovation-unavailable.png";

/// Composes the pipeline steps for project runs.
///
/// Shared via `Arc` by the event listener; independent projects run as
/// independent spawned tasks over the same instance. The only shared
/// mutable state is the bounded prompt cache.
pub struct Orchestrator<S: ProjectStore, B: BlobStore> {
    store: S,
    blobs: Arc<B>,
    http: reqwest::Client,
    api: GenerationApi,
    poller: TaskPoller,
    secrets: SecretResolver,
    provider_key_secret: String,
    prompt_cache: Mutex<BoundedCache>,
}

/// Validated project inputs; present and non-blank.
struct Inputs<'a> {
    room_type: &'a str,
    style: &'a str,
    budget: &'a str,
    source_image_url: &'a str,
}

impl<'a> Inputs<'a> {
    /// Extract inputs, or the list of missing field names.
    fn from_project(project: &'a Project) -> Result<Self, Vec<&'static str>> {
        fn non_blank(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let mut missing = Vec::new();
        let room_type = non_blank(&project.room_type).unwrap_or_else(|| {
            missing.push("room_type");
            ""
        });
        let style = non_blank(&project.style).unwrap_or_else(|| {
            missing.push("style");
            ""
        });
        let budget = non_blank(&project.budget).unwrap_or_else(|| {
            missing.push("budget");
            ""
        });
        let source_image_url = non_blank(&project.source_image_url).unwrap_or_else(|| {
            missing.push("source_image_url");
            ""
        });

        if missing.is_empty() {
            Ok(Self {
                room_type,
                style,
                budget,
                source_image_url,
            })
        } else {
            Err(missing)
        }
    }
}

impl<S: ProjectStore, B: BlobStore> Orchestrator<S, B> {
    /// Wire up an orchestrator from its collaborators.
    pub fn new(
        store: S,
        blobs: Arc<B>,
        api: GenerationApi,
        poller: TaskPoller,
        secrets: SecretResolver,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            store,
            blobs,
            http: reqwest::Client::new(),
            api,
            poller,
            secrets,
            provider_key_secret: config.provider_key_secret.clone(),
            prompt_cache: Mutex::new(BoundedCache::new(config.prompt_cache_capacity)),
        }
    }

    /// Run the full pipeline for a freshly created project.
    ///
    /// Fire-and-forget: every failure is caught and reconciled into
    /// the project record; callers get nothing back.
    pub async fn on_project_created(&self, project: Project) {
        let run_id = uuid::Uuid::new_v4();
        let project_id = project.id;
        tracing::info!(project_id, run_id = %run_id, "Pipeline run started");

        let current = match project.status() {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(project_id, error = %e, "Project has an unreadable status; skipping");
                return;
            }
        };
        if current != PipelineStatus::Unset {
            tracing::warn!(
                project_id,
                status = %current,
                "Project already progressed past unset; skipping duplicate event",
            );
            return;
        }

        // ---- input validation: unset -> failed -------------------------
        let inputs = match Inputs::from_project(&project) {
            Ok(inputs) => inputs,
            Err(missing) => {
                let error = format!("Missing required inputs: {}", missing.join(", "));
                tracing::warn!(project_id, %error, "Failing project without generation attempt");
                self.write_transition(project_id, current, PipelineStatus::Failed, || {
                    self.store.mark_failed(project_id, &error)
                })
                .await;
                return;
            }
        };

        // ---- unset -> processing ---------------------------------------
        if !self
            .write_transition(project_id, current, PipelineStatus::Processing, || {
                self.store.mark_processing(project_id)
            })
            .await
        {
            return;
        }

        // ---- analysis: processing -> generating_image ------------------
        // Deterministic rule-table analysis; must be durable before the
        // slow, fallible image step starts.
        let plan = build_plan(inputs.room_type, inputs.style, inputs.budget);
        tracing::info!(
            project_id,
            suggestions = plan.suggestions.len(),
            estimated_cost = plan.estimated_cost,
            estimated_value_added = plan.estimated_value_added,
            "Renovation analysis computed",
        );
        if !self
            .write_transition(
                project_id,
                PipelineStatus::Processing,
                PipelineStatus::GeneratingImage,
                || self.store.record_analysis(project_id, &plan),
            )
            .await
        {
            return;
        }

        // ---- image step: generating_image -> completed -----------------
        let outcome = self.run_image_step(project_id, &inputs, &plan).await;
        let (image_url, error) = match &outcome {
            Ok(url) => (url.as_str(), None),
            Err(e) => {
                let message = e.to_string();
                tracing::error!(project_id, error = %message, "Image step failed; completing with fallback");
                (FALLBACK_GENERATED_IMAGE, Some(message))
            }
        };

        self.write_transition(
            project_id,
            PipelineStatus::GeneratingImage,
            PipelineStatus::Completed,
            || {
                self.store
                    .record_outcome(project_id, image_url, error.as_deref())
            },
        )
        .await;

        tracing::info!(
            project_id,
            run_id = %run_id,
            succeeded = outcome.is_ok(),
            "Pipeline run finished",
        );
    }

    /// Resolve credential, submit, poll, and materialize.
    ///
    /// Credential failure aborts immediately; there is no point
    /// attempting submission without one.
    async fn run_image_step(
        &self,
        project_id: DbId,
        inputs: &Inputs<'_>,
        plan: &RenovationPlan,
    ) -> Result<String, PipelineError> {
        let credential = self.secrets.resolve(&self.provider_key_secret).await?;

        let instruction = self.edit_instruction(inputs, plan);
        let task_id = self
            .api
            .create_task(&credential, &instruction, inputs.source_image_url)
            .await?;
        tracing::info!(project_id, task_id = %task_id, "Generation task submitted");

        let result_url = self
            .poller
            .await_completion(&self.api, &credential, &task_id)
            .await?;
        tracing::info!(project_id, task_id = %task_id, "Generation task succeeded");

        let stored_url = materialize(&self.http, self.blobs.as_ref(), project_id, &result_url).await?;
        tracing::info!(project_id, url = %stored_url, "Generated image materialized");
        Ok(stored_url)
    }

    /// Memoized edit-instruction text, keyed by `room|style|budget`.
    fn edit_instruction(&self, inputs: &Inputs<'_>, plan: &RenovationPlan) -> String {
        let key = prompt::cache_key(inputs.room_type, inputs.style, inputs.budget);
        if let Ok(mut cache) = self.prompt_cache.lock() {
            if let Some(cached) = cache.get(&key) {
                return cached;
            }
            let instruction = prompt::edit_instruction(
                inputs.room_type,
                inputs.style,
                inputs.budget,
                &plan.target_appearance,
            );
            cache.insert(key, instruction.clone());
            return instruction;
        }
        // Poisoned cache lock: build uncached.
        prompt::edit_instruction(
            inputs.room_type,
            inputs.style,
            inputs.budget,
            &plan.target_appearance,
        )
    }

    /// Perform one guarded status-moving write, validating the
    /// transition first and logging any refusal. Returns whether the
    /// write applied.
    async fn write_transition<F, Fut>(
        &self,
        project_id: DbId,
        from: PipelineStatus,
        to: PipelineStatus,
        write: F,
    ) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<bool, crate::store::StoreError>>,
    {
        if !from.can_transition(to) {
            tracing::error!(
                project_id,
                from = %from,
                to = %to,
                "Refusing illegal status transition",
            );
            return false;
        }
        match write().await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(
                    project_id,
                    from = %from,
                    to = %to,
                    "Status transition applied to zero rows (stale status or missing project)",
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    project_id,
                    from = %from,
                    to = %to,
                    error = %e,
                    "Status transition write failed",
                );
                false
            }
        }
    }
}
