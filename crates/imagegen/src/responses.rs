//! Provider wire types and task-state classification.
//!
//! The provider speaks camelCase JSON with a `{code, msg, data}`
//! envelope. Everything is decoded into typed structs at the boundary;
//! shapes that do not parse become
//! [`ProviderError::MalformedResponse`](crate::error::ProviderError)
//! in the API layer instead of propagating as loose JSON.

use serde::{Deserialize, Serialize};

/// Envelope code the provider uses for success.
pub const CODE_OK: i64 = 200;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body for `POST /api/v1/images/edits`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    /// Free-text editing instructions.
    pub prompt: String,
    /// Source image references; always exactly one here.
    pub image_urls: Vec<String>,
    /// Number of output images requested.
    pub num_images: u32,
    /// Edit-in-place mode flag (vs. full synthesis).
    pub mode: &'static str,
    /// Aspect-ratio hint for the output.
    pub aspect_ratio: &'static str,
    /// Required by the provider schema. This system never hosts a
    /// callback receiver — it polls instead — so a syntactically valid
    /// placeholder goes here.
    pub callback_url: &'static str,
}

impl EditTaskRequest {
    /// Build the single-image edit request the pipeline sends.
    pub fn edit(prompt: impl Into<String>, source_image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_urls: vec![source_image_url.into()],
            num_images: 1,
            mode: "edit",
            aspect_ratio: "3:2",
            callback_url: "https://callbacks.invalid/generation-complete",
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Envelope for `POST /api/v1/images/edits` responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<CreateTaskData>,
}

/// Payload of a successful create-task response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Envelope for `GET /api/v1/images/tasks/{id}` responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<TaskStatusData>,
}

/// Task status payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusData {
    #[serde(default)]
    pub task_id: Option<String>,
    /// Raw provider state flag; see [`TaskState::from_flag`].
    pub success_flag: i64,
    #[serde(default)]
    pub response: Option<TaskResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Result block present once generation succeeds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    #[serde(default)]
    pub result_urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// Task state classification
// ---------------------------------------------------------------------------

/// Classified task state. Classification is total: every integer maps
/// to a variant, and unrecognized flags map to [`TaskState::Unknown`]
/// so provider schema drift degrades to continued polling rather than
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Still in progress.
    Generating,
    /// Terminal success; a result URL should be present.
    Success,
    /// Terminal failure: the provider could not create the task.
    CreateTaskFailed,
    /// Terminal failure: generation itself failed.
    GenerateFailed,
    /// Unrecognized flag value; treated as non-terminal.
    Unknown(i64),
}

impl TaskState {
    /// Map the provider's `successFlag` to a state.
    pub fn from_flag(flag: i64) -> Self {
        match flag {
            0 => Self::Generating,
            1 => Self::Success,
            2 => Self::CreateTaskFailed,
            3 => Self::GenerateFailed,
            other => Self::Unknown(other),
        }
    }

    /// True for states from which the task will not move again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::CreateTaskFailed | Self::GenerateFailed)
    }
}

/// Distilled status the poller works with.
#[derive(Debug, Clone)]
pub struct TaskStatus {
    pub state: TaskState,
    /// First result URL, when the provider supplied one.
    pub result_url: Option<String>,
    /// Provider error detail, when present.
    pub error_detail: Option<String>,
}

impl From<TaskStatusData> for TaskStatus {
    fn from(data: TaskStatusData) -> Self {
        let result_url = data
            .response
            .as_ref()
            .and_then(|r| r.result_urls.first())
            .filter(|url| !url.is_empty())
            .cloned();
        Self {
            state: TaskState::from_flag(data.success_flag),
            result_url,
            error_detail: data.error_message.filter(|m| !m.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flag_covers_documented_values() {
        assert_eq!(TaskState::from_flag(0), TaskState::Generating);
        assert_eq!(TaskState::from_flag(1), TaskState::Success);
        assert_eq!(TaskState::from_flag(2), TaskState::CreateTaskFailed);
        assert_eq!(TaskState::from_flag(3), TaskState::GenerateFailed);
    }

    #[test]
    fn from_flag_is_total() {
        // Anything outside the documented range is Unknown, never a panic.
        for flag in [-1, 4, 7, 99, i64::MAX, i64::MIN] {
            assert_eq!(TaskState::from_flag(flag), TaskState::Unknown(flag));
            assert!(!TaskState::from_flag(flag).is_terminal());
        }
    }

    #[test]
    fn terminal_states() {
        assert!(TaskState::Success.is_terminal());
        assert!(TaskState::CreateTaskFailed.is_terminal());
        assert!(TaskState::GenerateFailed.is_terminal());
        assert!(!TaskState::Generating.is_terminal());
    }

    #[test]
    fn create_envelope_decodes_camel_case() {
        let body = r#"{"code":200,"msg":"success","data":{"taskId":"task-123"}}"#;
        let envelope: CreateTaskEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.code, 200);
        assert_eq!(envelope.data.unwrap().task_id.as_deref(), Some("task-123"));
    }

    #[test]
    fn status_envelope_decodes_result_urls() {
        let body = r#"{
            "code": 200,
            "data": {
                "taskId": "task-123",
                "successFlag": 1,
                "response": {"resultUrls": ["https://cdn.provider.example/out.png"]}
            }
        }"#;
        let envelope: StatusEnvelope = serde_json::from_str(body).unwrap();
        let status = TaskStatus::from(envelope.data.unwrap());
        assert_eq!(status.state, TaskState::Success);
        assert_eq!(
            status.result_url.as_deref(),
            Some("https://cdn.provider.example/out.png")
        );
    }

    #[test]
    fn status_without_result_block_has_no_url() {
        let body = r#"{"code":200,"data":{"taskId":"t","successFlag":0}}"#;
        let envelope: StatusEnvelope = serde_json::from_str(body).unwrap();
        let status = TaskStatus::from(envelope.data.unwrap());
        assert_eq!(status.state, TaskState::Generating);
        assert!(status.result_url.is_none());
        assert!(status.error_detail.is_none());
    }

    #[test]
    fn edit_request_serializes_provider_schema() {
        let request = EditTaskRequest::edit("repaint the walls", "https://img/src.jpg");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "repaint the walls");
        assert_eq!(json["imageUrls"][0], "https://img/src.jpg");
        assert_eq!(json["numImages"], 1);
        assert_eq!(json["mode"], "edit");
        assert_eq!(json["aspectRatio"], "3:2");
        // Placeholder must still be a syntactically valid URL.
        assert!(json["callbackUrl"].as_str().unwrap().starts_with("https://"));
    }
}
