//! Secret resolution: env override first, then the secret store.

use std::sync::Arc;

use crate::error::SecretError;

/// Raw payload of one secret version. Stores may return a string, a
/// binary blob, or both.
#[derive(Debug, Clone, Default)]
pub struct SecretValue {
    pub string: Option<String>,
    pub binary: Option<Vec<u8>>,
}

/// Backend that can fetch the latest current version of a secret by
/// fully-qualified path.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync + 'static {
    async fn fetch_current(&self, path: &str) -> Result<SecretValue, SecretError>;
}

/// Resolves logical secret names to credential strings.
///
/// Resolution order: environment override, then `{scope}/{name}` in
/// the store. Values are immutable for the process lifetime; callers
/// must re-resolve after a restart rather than caching across it.
pub struct SecretResolver {
    scope: String,
    store: Arc<dyn SecretStore>,
}

impl SecretResolver {
    /// Create a resolver with the configured scope prefix and backend.
    pub fn new(scope: impl Into<String>, store: Arc<dyn SecretStore>) -> Self {
        Self {
            scope: scope.into(),
            store,
        }
    }

    /// Resolve a logical secret name to its credential string.
    ///
    /// The credential value itself is never logged — only which source
    /// satisfied the lookup.
    pub async fn resolve(&self, logical_name: &str) -> Result<String, SecretError> {
        let override_var = env_override_var(logical_name);
        if let Ok(value) = std::env::var(&override_var) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                tracing::info!(
                    secret = logical_name,
                    source = "env",
                    var = %override_var,
                    "Resolved credential from environment override",
                );
                return Ok(trimmed.to_string());
            }
        }

        let path = self.secret_path(logical_name);
        let value = self.store.fetch_current(&path).await?;

        // Fallback retrieval: stores may deliver the payload as binary.
        let text = match value.string {
            Some(s) => s,
            None => match value.binary {
                Some(bytes) => {
                    String::from_utf8(bytes).map_err(|_| SecretError::Store {
                        path: path.clone(),
                        detail: "binary payload is not valid UTF-8".to_string(),
                    })?
                }
                None => String::new(),
            },
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SecretError::Empty {
                name: logical_name.to_string(),
            });
        }

        tracing::info!(
            secret = logical_name,
            source = "store",
            path = %path,
            "Resolved credential from secret store",
        );
        Ok(trimmed.to_string())
    }

    /// Fully-qualified store path for a logical name.
    fn secret_path(&self, logical_name: &str) -> String {
        format!("{}/{}", self.scope, logical_name)
    }
}

/// Environment variable checked before the store: upper-snake form of
/// the logical name (`provider-api-key` → `PROVIDER_API_KEY`).
pub fn env_override_var(logical_name: &str) -> String {
    logical_name
        .chars()
        .map(|c| match c {
            '-' | '.' | '/' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
