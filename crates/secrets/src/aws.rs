//! AWS Secrets Manager backend.

use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};

use crate::error::SecretError;
use crate::resolver::{SecretStore, SecretValue};

/// [`SecretStore`] backed by AWS Secrets Manager. Fetches the latest
/// current (`AWSCURRENT`) version of each secret.
pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretStore {
    /// Load AWS config from the environment and connect.
    pub async fn connect(region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region))
            .load()
            .await;
        Self {
            client: aws_sdk_secretsmanager::Client::new(&config),
        }
    }

    /// Wrap an existing client (tests, custom config).
    pub fn with_client(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretStore {
    async fn fetch_current(&self, path: &str) -> Result<SecretValue, SecretError> {
        match self.client.get_secret_value().secret_id(path).send().await {
            Ok(output) => Ok(SecretValue {
                string: output.secret_string().map(str::to_string),
                binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
            }),
            Err(err) => {
                let code = err.code().map(str::to_string);
                let classified = match code.as_deref() {
                    Some("ResourceNotFoundException") => SecretError::NotFound {
                        path: path.to_string(),
                    },
                    Some("AccessDeniedException") => SecretError::PermissionDenied {
                        path: path.to_string(),
                    },
                    _ => SecretError::Store {
                        path: path.to_string(),
                        detail: DisplayErrorContext(err).to_string(),
                    },
                };
                Err(classified)
            }
        }
    }
}
