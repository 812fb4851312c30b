//! Pipeline configuration loaded from environment variables.

/// Configuration for one worker process.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base URL of the image-editing provider API.
    pub provider_api_url: String,
    /// Logical name of the provider API credential.
    pub provider_key_secret: String,
    /// Scope prefix for secret store paths.
    pub secrets_scope: String,
    /// S3 bucket holding generated media.
    pub media_bucket: String,
    /// AWS region for S3 and Secrets Manager.
    pub aws_region: String,
    /// Poll attempt budget per generation task.
    pub poll_max_attempts: u32,
    /// Sleep between poll attempts, milliseconds.
    pub poll_interval_ms: u64,
    /// Bounded prompt-cache capacity.
    pub prompt_cache_capacity: usize,
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `PROVIDER_API_URL`      | `http://localhost:8700`     |
    /// | `PROVIDER_KEY_SECRET`   | `provider-api-key`          |
    /// | `SECRETS_SCOPE`         | `renovo`                    |
    /// | `MEDIA_BUCKET`          | `renovo-media`              |
    /// | `AWS_REGION`            | `us-east-1`                 |
    /// | `POLL_MAX_ATTEMPTS`     | `60`                        |
    /// | `POLL_INTERVAL_MS`      | `3000`                      |
    /// | `PROMPT_CACHE_CAPACITY` | `128`                       |
    pub fn from_env() -> Self {
        let provider_api_url =
            std::env::var("PROVIDER_API_URL").unwrap_or_else(|_| "http://localhost:8700".into());

        let provider_key_secret =
            std::env::var("PROVIDER_KEY_SECRET").unwrap_or_else(|_| "provider-api-key".into());

        let secrets_scope = std::env::var("SECRETS_SCOPE").unwrap_or_else(|_| "renovo".into());

        let media_bucket = std::env::var("MEDIA_BUCKET").unwrap_or_else(|_| "renovo-media".into());

        let aws_region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());

        let poll_max_attempts: u32 = std::env::var("POLL_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("POLL_MAX_ATTEMPTS must be a valid u32");

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("POLL_INTERVAL_MS must be a valid u64");

        let prompt_cache_capacity: usize = std::env::var("PROMPT_CACHE_CAPACITY")
            .unwrap_or_else(|_| "128".into())
            .parse()
            .expect("PROMPT_CACHE_CAPACITY must be a valid usize");

        Self {
            provider_api_url,
            provider_key_secret,
            secrets_scope,
            media_bucket,
            aws_region,
            poll_max_attempts,
            poll_interval_ms,
            prompt_cache_capacity,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            provider_api_url: "http://localhost:8700".into(),
            provider_key_secret: "provider-api-key".into(),
            secrets_scope: "renovo".into(),
            media_bucket: "renovo-media".into(),
            aws_region: "us-east-1".into(),
            poll_max_attempts: 60,
            poll_interval_ms: 3000,
            prompt_cache_capacity: 128,
        }
    }
}
