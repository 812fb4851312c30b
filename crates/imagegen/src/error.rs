//! Errors from the provider API layer and poller.

/// Errors that can occur while submitting or polling a generation task.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the credential outright (HTTP 401).
    /// Classified separately from other rejections so operators can
    /// tell bad credentials from bad requests.
    #[error("Authentication failed: the image provider rejected the supplied API credential (HTTP 401)")]
    AuthenticationFailed,

    /// The provider refused the submission (non-success envelope code,
    /// missing task id, or a non-2xx response other than 401).
    #[error("Generation request rejected by provider (code {code}): {message}")]
    SubmissionRejected { code: i64, message: String },

    /// A response body failed to parse as the expected structure. The
    /// excerpt is truncated so log growth stays bounded.
    #[error("Malformed provider response while {context}: {excerpt}")]
    MalformedResponse {
        context: &'static str,
        excerpt: String,
    },

    /// The provider reported it could not create the task.
    #[error("Provider failed to create generation task {task_id}: {detail}")]
    TaskCreationFailed { task_id: String, detail: String },

    /// The provider reported the generation itself failed.
    #[error("Image generation failed for task {task_id}: {detail}")]
    GenerationFailed { task_id: String, detail: String },

    /// The poller exhausted its attempt budget without a terminal
    /// state. Reports wall-clock time and the task id so an operator
    /// can follow up manually.
    #[error("Timed out waiting for generation task {task_id}: no terminal status after {attempts} attempts ({elapsed_secs} seconds)")]
    PollTimeout {
        task_id: String,
        attempts: u32,
        elapsed_secs: u64,
    },

    /// A status check returned a non-2xx code. The poller tolerates
    /// these per attempt; only the submitter surfaces them directly.
    #[error("Status check failed: provider returned HTTP {status}")]
    StatusCheckFailed { status: u16 },

    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
