//! Sequential status-poll loop for generation tasks.
//!
//! One task, one poller, no parallel polling: each attempt sleeps for
//! the configured interval and then asks for status once. A failed
//! status check (network error, non-2xx, undecodable body) is logged
//! and counted against the attempt budget, then polling continues.
//! Only a terminal provider state or an exhausted budget ends the loop.

use std::time::Duration;

use crate::api::GenerationApi;
use crate::error::ProviderError;
use crate::responses::TaskState;

/// Polls a task until it reaches a terminal state or times out.
#[derive(Debug, Clone)]
pub struct TaskPoller {
    max_attempts: u32,
    interval: Duration,
}

impl TaskPoller {
    /// Create a poller with an attempt budget and per-attempt interval.
    pub fn new(max_attempts: u32, interval_ms: u64) -> Self {
        Self {
            max_attempts,
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Wait for the task to complete, returning the result image URL.
    ///
    /// Terminal outcomes:
    /// - flag 1 with a result URL → `Ok(url)`;
    /// - flag 1 without one → [`ProviderError::MalformedResponse`];
    /// - flag 2 → [`ProviderError::TaskCreationFailed`];
    /// - flag 3 → [`ProviderError::GenerationFailed`];
    /// - budget exhausted → [`ProviderError::PollTimeout`].
    ///
    /// Unrecognized flags are logged at warn level and treated as
    /// still-generating, tolerating provider schema drift.
    pub async fn await_completion(
        &self,
        api: &GenerationApi,
        credential: &str,
        task_id: &str,
    ) -> Result<String, ProviderError> {
        for attempt in 1..=self.max_attempts {
            tokio::time::sleep(self.interval).await;

            let status = match api.task_status(credential, task_id).await {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(
                        task_id,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Status check failed; continuing to poll",
                    );
                    continue;
                }
            };

            match status.state {
                TaskState::Generating => {
                    tracing::debug!(task_id, attempt, "Task still generating");
                }
                TaskState::Unknown(flag) => {
                    tracing::warn!(
                        task_id,
                        attempt,
                        flag,
                        "Unrecognized successFlag value; continuing to poll",
                    );
                }
                TaskState::Success => {
                    return status.result_url.ok_or(ProviderError::MalformedResponse {
                        context: "reading generation result",
                        excerpt: "successFlag=1 with no result URLs".to_string(),
                    });
                }
                TaskState::CreateTaskFailed => {
                    return Err(ProviderError::TaskCreationFailed {
                        task_id: task_id.to_string(),
                        detail: status
                            .error_detail
                            .unwrap_or_else(|| "no detail from provider".to_string()),
                    });
                }
                TaskState::GenerateFailed => {
                    return Err(ProviderError::GenerationFailed {
                        task_id: task_id.to_string(),
                        detail: status
                            .error_detail
                            .unwrap_or_else(|| "no detail from provider".to_string()),
                    });
                }
            }
        }

        Err(self.timeout_error(task_id))
    }

    /// The timeout error for this poller's budget, reporting total
    /// wall-clock wait time.
    fn timeout_error(&self, task_id: &str) -> ProviderError {
        let elapsed_ms = u64::from(self.max_attempts) * self.interval.as_millis() as u64;
        ProviderError::PollTimeout {
            task_id: task_id.to_string(),
            attempts: self.max_attempts,
            elapsed_secs: elapsed_ms / 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn timeout_reports_wall_clock_seconds() {
        // The production defaults: 60 attempts at 3000ms.
        let poller = TaskPoller::new(60, 3000);
        let err = poller.timeout_error("task-7");
        assert_matches!(
            &err,
            ProviderError::PollTimeout { attempts: 60, elapsed_secs: 180, .. }
        );
        assert!(err.to_string().contains("180 seconds"));
        assert!(err.to_string().contains("task-7"));
    }

    #[test]
    fn sub_second_budgets_round_down() {
        let poller = TaskPoller::new(3, 100);
        assert_matches!(
            poller.timeout_error("t"),
            ProviderError::PollTimeout { elapsed_secs: 0, .. }
        );
    }
}
