//! Wire types for the backend's asynchronous tasks.
//!
//! Every long-running flow (geração de planilha, organizador IA, extração de
//! imagens) answers a submission with a `task_id` and is then observed
//! through `GET task-status/{id}/` until it reaches a terminal status.

use serde::{Deserialize, Serialize};

pub mod poller;
pub mod results;

pub use poller::{PollPhase, PollSignal, PollerState};
pub use results::{
    decode_outcome, GeneratedSpreadsheet, JobKind, JobOutcome, OrganizedContent, ScrapedImages,
};

/// Task status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Progress,
    Success,
    Failure,
    /// Any status value this client does not know; treated as "still running".
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failure)
    }
}

/// Response of every submission endpoint (`gerar-planilha/`, `organizador-ia/`,
/// `scrape-images/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedTask {
    pub task_id: String,
}

/// One poll response. `result` is only meaningful while `PROGRESS` (progress
/// meta) and on terminal statuses (job outcome or error detail); its shape
/// depends on the job kind, see [`results`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub status: TaskStatus,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Progress meta carried in `result` while the task reports `PROGRESS`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressMeta {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub current: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl ProgressMeta {
    pub fn from_result(result: Option<&serde_json::Value>) -> Self {
        result
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    /// Human-readable label for the loading overlay, e.g.
    /// `"Enriquecendo produto (2 de 10)"`. Falls back to `fallback` when the
    /// backend sent no step description.
    pub fn label(&self, fallback: &str) -> String {
        match (&self.step, self.current, self.total) {
            (Some(step), Some(current), Some(total)) => {
                format!("{} ({} de {})", step, current, total)
            }
            (Some(step), _, _) => step.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub const GENERIC_TASK_FAILURE: &str = "Ocorreu um erro ao processar a tarefa.";

/// Extracts the error text from a `FAILURE` payload. Celery workers report
/// `exc_message`; plain handlers use `error` or `detail`.
pub fn failure_message(result: Option<&serde_json::Value>) -> String {
    let Some(value) = result else {
        return GENERIC_TASK_FAILURE.to_string();
    };
    for key in ["exc_message", "error", "detail"] {
        if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    if let Some(text) = value.as_str() {
        if !text.is_empty() {
            return text.to_string();
        }
    }
    GENERIC_TASK_FAILURE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        let response: TaskStatusResponse =
            serde_json::from_value(json!({ "status": "PROGRESS", "result": { "step": "Lendo planilha", "current": 1, "total": 3 } }))
                .unwrap();
        assert_eq!(response.status, TaskStatus::Progress);
        let meta = ProgressMeta::from_result(response.result.as_ref());
        assert_eq!(meta.step.as_deref(), Some("Lendo planilha"));
        assert_eq!(meta.label("..."), "Lendo planilha (1 de 3)");
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let response: TaskStatusResponse =
            serde_json::from_value(json!({ "status": "RETRY" })).unwrap();
        assert_eq!(response.status, TaskStatus::Unknown);
        assert!(!response.status.is_terminal());
    }

    #[test]
    fn test_failure_message_extraction() {
        assert_eq!(
            failure_message(Some(&json!({ "exc_message": "timeout" }))),
            "timeout"
        );
        assert_eq!(failure_message(Some(&json!({ "error": "sem crédito" }))), "sem crédito");
        assert_eq!(failure_message(None), GENERIC_TASK_FAILURE);
        assert_eq!(failure_message(Some(&json!({ "other": 1 }))), GENERIC_TASK_FAILURE);
    }
}
