//! Credential resolution errors.
//!
//! Every variant renders with a "Credential unavailable" prefix: a
//! missing credential aborts the whole pipeline run, and the recorded
//! project error should say so in one consistent voice.

/// Why a credential could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// The store denied access. The message carries the IAM
    /// remediation so an operator can fix the role without digging.
    #[error("Credential unavailable: access to secret '{path}' was denied; grant the worker role secretsmanager:GetSecretValue on this secret")]
    PermissionDenied { path: String },

    /// The secret, or its current version, does not exist.
    #[error("Credential unavailable: secret '{path}' (or its current version) does not exist")]
    NotFound { path: String },

    /// The payload was empty after trimming.
    #[error("Credential unavailable: secret '{name}' resolved to an empty value")]
    Empty { name: String },

    /// Any other store failure.
    #[error("Credential unavailable: failed to read secret '{path}': {detail}")]
    Store { path: String, detail: String },
}
