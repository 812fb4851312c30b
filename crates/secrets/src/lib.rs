//! Credential resolution for the pipeline.
//!
//! [`SecretResolver`] checks an environment override first (local
//! development never needs the secret store), then fetches the latest
//! current version from a [`SecretStore`] backend. The AWS Secrets
//! Manager backend is the production store; [`StaticSecretStore`]
//! serves tests and local development.

pub mod aws;
pub mod error;
pub mod resolver;
pub mod static_store;

pub use aws::AwsSecretStore;
pub use error::SecretError;
pub use resolver::{SecretResolver, SecretStore, SecretValue};
pub use static_store::StaticSecretStore;
