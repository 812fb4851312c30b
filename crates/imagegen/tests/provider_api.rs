//! Provider client behavior against a mock HTTP server.

use assert_matches::assert_matches;
use renovo_imagegen::{GenerationApi, ProviderError, TaskPoller};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> GenerationApi {
    GenerationApi::new(server.uri())
}

fn status_body(flag: i64) -> serde_json::Value {
    json!({"code": 200, "data": {"taskId": "task-1", "successFlag": flag}})
}

fn success_body(result_url: &str) -> serde_json::Value {
    json!({
        "code": 200,
        "data": {
            "taskId": "task-1",
            "successFlag": 1,
            "response": {"resultUrls": [result_url]}
        }
    })
}

// ---------------------------------------------------------------------------
// create_task
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_task_submits_edit_request_and_returns_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/images/edits"))
        .and(header("authorization", "Bearer secret-key"))
        .and(body_partial_json(json!({
            "numImages": 1,
            "mode": "edit",
            "imageUrls": ["https://cdn.example.com/room.jpg"]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 200, "msg": "success", "data": {"taskId": "task-42"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let task_id = api_for(&server)
        .create_task("secret-key", "repaint the walls", "https://cdn.example.com/room.jpg")
        .await
        .unwrap();

    assert_eq!(task_id, "task-42");
}

#[tokio::test]
async fn create_task_classifies_401_as_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/images/edits"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"code": 401, "msg": "bad key"})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_task("bad-key", "p", "https://img/src.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::AuthenticationFailed);
    assert!(err.to_string().contains("Authentication failed"));
}

#[tokio::test]
async fn create_task_surfaces_provider_message_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/images/edits"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"code": 422, "msg": "image URL is not reachable"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_task("key", "p", "https://img/src.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::SubmissionRejected { .. });
    assert!(err.to_string().contains("image URL is not reachable"));
}

#[tokio::test]
async fn create_task_rejects_success_envelope_without_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/images/edits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": {}})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_task("key", "p", "https://img/src.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::SubmissionRejected { .. });
}

#[tokio::test]
async fn create_task_reports_malformed_body_with_excerpt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/images/edits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_task("key", "p", "https://img/src.jpg")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::MalformedResponse { .. });
    assert!(err.to_string().contains("gateway error"));
}

// ---------------------------------------------------------------------------
// poller
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poller_waits_through_generating_states() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(0)))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body("https://cdn.provider/out.png")),
        )
        .mount(&server)
        .await;

    let url = TaskPoller::new(10, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.provider/out.png");
}

#[tokio::test]
async fn poller_survives_failed_status_checks() {
    let server = MockServer::start().await;
    // Two transient 500s, then success: the failures burn attempts but
    // never abort the loop.
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body("https://cdn.provider/out.png")),
        )
        .mount(&server)
        .await;

    let url = TaskPoller::new(10, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.provider/out.png");
}

#[tokio::test]
async fn poller_keeps_polling_on_unrecognized_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(7)))
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body("https://cdn.provider/out.png")),
        )
        .mount(&server)
        .await;

    let url = TaskPoller::new(10, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.provider/out.png");
}

#[tokio::test]
async fn poller_fails_on_create_task_failed_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "taskId": "task-1",
                "successFlag": 2,
                "errorMessage": "queue rejected the workflow"
            }
        })))
        .mount(&server)
        .await;

    let err = TaskPoller::new(5, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::TaskCreationFailed { .. });
    assert!(err.to_string().contains("queue rejected the workflow"));
}

#[tokio::test]
async fn poller_fails_on_generate_failed_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {"taskId": "task-1", "successFlag": 3, "errorMessage": "NSFW filter"}
        })))
        .mount(&server)
        .await;

    let err = TaskPoller::new(5, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::GenerationFailed { .. });
    assert!(err.to_string().contains("task-1"));
}

#[tokio::test]
async fn poller_times_out_after_attempt_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(0)))
        .expect(4)
        .mount(&server)
        .await;

    let err = TaskPoller::new(4, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::PollTimeout { attempts: 4, .. });
    assert!(err.to_string().contains("task-1"));
    assert!(err.to_string().contains("4 attempts"));
}

#[tokio::test]
async fn poller_rejects_success_without_result_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/images/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(1)))
        .mount(&server)
        .await;

    let err = TaskPoller::new(5, 1)
        .await_completion(&api_for(&server), "key", "task-1")
        .await
        .unwrap_err();

    assert_matches!(err, ProviderError::MalformedResponse { .. });
}
