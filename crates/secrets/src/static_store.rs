//! Fixed-map secret backend for tests and local development.

use std::collections::HashMap;

use crate::error::SecretError;
use crate::resolver::{SecretStore, SecretValue};

/// A [`SecretStore`] backed by an in-memory map of path → value.
#[derive(Debug, Default)]
pub struct StaticSecretStore {
    values: HashMap<String, String>,
}

impl StaticSecretStore {
    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(path.into(), value.into());
        self
    }
}

#[async_trait::async_trait]
impl SecretStore for StaticSecretStore {
    async fn fetch_current(&self, path: &str) -> Result<SecretValue, SecretError> {
        match self.values.get(path) {
            Some(value) => Ok(SecretValue {
                string: Some(value.clone()),
                binary: None,
            }),
            None => Err(SecretError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}
