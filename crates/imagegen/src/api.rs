//! REST API client for the image-editing provider.
//!
//! Wraps the provider's HTTP API (task submission and status retrieval)
//! using [`reqwest`]. Bodies are decoded into the typed structures in
//! [`crate::responses`]; anything that does not parse becomes a
//! [`ProviderError::MalformedResponse`] carrying a bounded excerpt of
//! the raw body.

use crate::error::ProviderError;
use crate::responses::{
    CreateTaskEnvelope, EditTaskRequest, StatusEnvelope, TaskStatus, CODE_OK,
};

/// Maximum number of characters of a raw body kept in error excerpts.
const BODY_EXCERPT_MAX: usize = 256;

/// HTTP client for the provider API.
pub struct GenerationApi {
    client: reqwest::Client,
    api_url: String,
}

impl GenerationApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `https://api.provider.example`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Submit an edit task.
    ///
    /// Sends one `POST /api/v1/images/edits` request. Success requires
    /// both the envelope code `200` and a non-empty task id; anything
    /// else is a rejection. HTTP 401 is classified separately so
    /// operators can distinguish bad credentials from bad requests.
    pub async fn create_task(
        &self,
        credential: &str,
        prompt: &str,
        source_image_url: &str,
    ) -> Result<String, ProviderError> {
        let request = EditTaskRequest::edit(prompt, source_image_url);

        let response = self
            .client
            .post(format!("{}/api/v1/images/edits", self.api_url))
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.as_u16() == 401 {
            return Err(ProviderError::AuthenticationFailed);
        }
        if !status.is_success() {
            // Prefer the provider's own message when the error body
            // still parses as an envelope.
            let message = serde_json::from_str::<CreateTaskEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.msg)
                .unwrap_or_else(|| excerpt(&body));
            return Err(ProviderError::SubmissionRejected {
                code: i64::from(status.as_u16()),
                message,
            });
        }

        let envelope: CreateTaskEnvelope =
            serde_json::from_str(&body).map_err(|_| ProviderError::MalformedResponse {
                context: "submitting generation task",
                excerpt: excerpt(&body),
            })?;

        let task_id = envelope
            .data
            .and_then(|data| data.task_id)
            .filter(|id| !id.is_empty());

        match task_id {
            Some(id) if envelope.code == CODE_OK => Ok(id),
            _ => Err(ProviderError::SubmissionRejected {
                code: envelope.code,
                message: envelope
                    .msg
                    .unwrap_or_else(|| "no task id in response".to_string()),
            }),
        }
    }

    /// Retrieve the current status of a task.
    ///
    /// Sends `GET /api/v1/images/tasks/{task_id}`. Non-2xx responses
    /// and undecodable bodies are errors here; the poller decides
    /// whether a given failure aborts or just burns one attempt.
    pub async fn task_status(
        &self,
        credential: &str,
        task_id: &str,
    ) -> Result<TaskStatus, ProviderError> {
        let response = self
            .client
            .get(format!("{}/api/v1/images/tasks/{}", self.api_url, task_id))
            .bearer_auth(credential)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::StatusCheckFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: StatusEnvelope =
            serde_json::from_str(&body).map_err(|_| ProviderError::MalformedResponse {
                context: "checking task status",
                excerpt: excerpt(&body),
            })?;

        if envelope.code != CODE_OK {
            return Err(ProviderError::StatusCheckFailed {
                status: u16::try_from(envelope.code).unwrap_or(0),
            });
        }

        envelope
            .data
            .map(TaskStatus::from)
            .ok_or(ProviderError::MalformedResponse {
                context: "checking task status",
                excerpt: excerpt(&body),
            })
    }
}

/// Truncate a raw body for inclusion in error messages.
fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_MAX {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_EXCERPT_MAX).collect();
        format!("{cut}…")
    }
}
