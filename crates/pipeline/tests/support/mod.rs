//! Shared fixtures for pipeline integration tests.
//!
//! Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use renovo_core::plan::RenovationPlan;
use renovo_core::status::PipelineStatus;
use renovo_core::types::DbId;
use renovo_db::models::project::Project;
use renovo_pipeline::store::{ProjectStore, StoreError};
use renovo_pipeline::PipelineConfig;
use renovo_secrets::{SecretResolver, StaticSecretStore};

/// In-memory [`ProjectStore`] mirroring the repository's guarded
/// transition semantics.
#[derive(Clone, Default)]
pub struct MemoryProjectStore {
    projects: Arc<Mutex<HashMap<DbId, Project>>>,
}

impl MemoryProjectStore {
    pub fn with_project(project: Project) -> Self {
        let store = Self::default();
        store.projects.lock().unwrap().insert(project.id, project);
        store
    }

    pub fn get(&self, id: DbId) -> Project {
        self.projects.lock().unwrap().get(&id).cloned().expect("project should exist")
    }
}

#[async_trait::async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn find(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.lock().unwrap().get(&id).cloned())
    }

    async fn mark_processing(&self, id: DbId) -> Result<bool, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&id) {
            Some(p) if p.status_name == PipelineStatus::Unset.name() => {
                p.status_name = PipelineStatus::Processing.name().to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_failed(&self, id: DbId, error: &str) -> Result<bool, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&id) {
            Some(p) if p.status_name == PipelineStatus::Unset.name() => {
                p.status_name = PipelineStatus::Failed.name().to_string();
                p.error = Some(error.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_analysis(&self, id: DbId, plan: &RenovationPlan) -> Result<bool, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&id) {
            Some(p) if p.status_name == PipelineStatus::Processing.name() => {
                p.status_name = PipelineStatus::GeneratingImage.name().to_string();
                p.suggestions = Some(
                    serde_json::to_value(&plan.suggestions)
                        .map_err(|e| StoreError(e.to_string()))?,
                );
                p.estimated_cost = Some(plan.estimated_cost);
                p.estimated_value_added = Some(plan.estimated_value_added);
                p.target_appearance = Some(plan.target_appearance.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_outcome(
        &self,
        id: DbId,
        generated_image_url: &str,
        error: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&id) {
            Some(p) if p.status_name == PipelineStatus::GeneratingImage.name() => {
                p.status_name = PipelineStatus::Completed.name().to_string();
                p.generated_image_url = Some(generated_image_url.to_string());
                p.error = error.map(str::to_string);
                p.processed_at = Some(chrono::Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_generated_image_url(&self, id: DbId, url: &str) -> Result<bool, StoreError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&id) {
            Some(p) => {
                p.generated_image_url = Some(url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// A fresh project in `unset` with the given inputs.
pub fn project(
    id: DbId,
    room_type: Option<&str>,
    style: Option<&str>,
    budget: Option<&str>,
    source_image_url: Option<&str>,
) -> Project {
    let now = chrono::Utc::now();
    Project {
        id,
        room_type: room_type.map(str::to_string),
        style: style.map(str::to_string),
        budget: budget.map(str::to_string),
        source_image_url: source_image_url.map(str::to_string),
        status_name: PipelineStatus::Unset.name().to_string(),
        error: None,
        suggestions: None,
        estimated_cost: None,
        estimated_value_added: None,
        target_appearance: None,
        generated_image_url: None,
        processed_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// A complete, valid kitchen project.
pub fn kitchen_project(id: DbId, source_image_url: &str) -> Project {
    project(
        id,
        Some("kitchen"),
        Some("modern"),
        Some("$5000 high"),
        Some(source_image_url),
    )
}

/// Config pointed at a mock provider with millisecond polling.
pub fn test_config(provider_api_url: &str) -> PipelineConfig {
    PipelineConfig {
        provider_api_url: provider_api_url.to_string(),
        poll_max_attempts: 10,
        poll_interval_ms: 1,
        ..PipelineConfig::default()
    }
}

/// Resolver whose store knows the provider credential.
pub fn secrets_with_key() -> SecretResolver {
    SecretResolver::new(
        "renovo",
        Arc::new(StaticSecretStore::default().with("renovo/provider-api-key", "test-key")),
    )
}

/// Resolver whose store is empty (credential resolution fails).
pub fn secrets_without_key() -> SecretResolver {
    SecretResolver::new("renovo", Arc::new(StaticSecretStore::default()))
}
