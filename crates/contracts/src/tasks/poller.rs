//! Poller state machine.
//!
//! The browser side owns the timer and the HTTP calls; this type owns the
//! transitions, so the terminal guarantees (each callback at most once,
//! nothing after cancel, no overlapping ticks) hold no matter how the timer
//! loop is wired.

use super::{failure_message, ProgressMeta, TaskStatus, TaskStatusResponse};

/// `Polling → {Succeeded | Failed | Cancelled}`; the three right-hand phases
/// are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Polling,
    Succeeded,
    Failed,
    Cancelled,
}

/// What the driver must do with one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum PollSignal {
    /// Keep polling; nothing to report.
    Continue,
    /// Keep polling; surface the progress meta.
    Progress(ProgressMeta),
    /// Stop; deliver the result payload to the materializer.
    Succeeded(Option<serde_json::Value>),
    /// Stop; surface the error.
    Failed(String),
}

#[derive(Debug)]
pub struct PollerState {
    phase: PollPhase,
    tick_in_flight: bool,
}

impl PollerState {
    pub fn new() -> Self {
        Self {
            phase: PollPhase::Polling,
            tick_in_flight: false,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn should_poll(&self) -> bool {
        self.phase == PollPhase::Polling
    }

    /// Claims the next tick. Returns `false` while a previous request is
    /// still in flight or the poller already reached a terminal phase; the
    /// caller must skip the tick in that case. A fixed-interval timer alone
    /// does not guarantee the previous request resolved first.
    pub fn begin_tick(&mut self) -> bool {
        if !self.should_poll() || self.tick_in_flight {
            return false;
        }
        self.tick_in_flight = true;
        true
    }

    pub fn finish_tick(&mut self) {
        self.tick_in_flight = false;
    }

    /// Feeds one status response through the machine. Observations after a
    /// terminal phase are ignored, which is what makes the success/failure
    /// callbacks exactly-once even if a response was in flight when the
    /// poller was cancelled.
    pub fn observe(&mut self, response: &TaskStatusResponse) -> PollSignal {
        if self.phase != PollPhase::Polling {
            return PollSignal::Continue;
        }
        match response.status {
            TaskStatus::Success => {
                self.phase = PollPhase::Succeeded;
                PollSignal::Succeeded(response.result.clone())
            }
            TaskStatus::Failure => {
                self.phase = PollPhase::Failed;
                PollSignal::Failed(failure_message(response.result.as_ref()))
            }
            TaskStatus::Progress => {
                PollSignal::Progress(ProgressMeta::from_result(response.result.as_ref()))
            }
            TaskStatus::Pending | TaskStatus::Unknown => PollSignal::Continue,
        }
    }

    /// A query-level failure (network or parse error) is immediately
    /// terminal; the backend keeps running the job but this client stops
    /// watching it.
    pub fn fail(&mut self, message: impl Into<String>) -> PollSignal {
        if self.phase != PollPhase::Polling {
            return PollSignal::Continue;
        }
        self.phase = PollPhase::Failed;
        PollSignal::Failed(message.into())
    }

    /// Stops the poller. No-op after natural termination, so teardown code
    /// can call it unconditionally.
    pub fn cancel(&mut self) {
        if self.phase == PollPhase::Polling {
            self.phase = PollPhase::Cancelled;
        }
    }
}

impl Default for PollerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: &str, result: serde_json::Value) -> TaskStatusResponse {
        serde_json::from_value(json!({ "status": status, "result": result })).unwrap()
    }

    fn bare(status: &str) -> TaskStatusResponse {
        serde_json::from_value(json!({ "status": status })).unwrap()
    }

    #[test]
    fn test_progress_progress_success() {
        let mut poller = PollerState::new();
        let mut progress = 0;
        let mut success = 0;

        for resp in [
            response("PROGRESS", json!({ "step": "a" })),
            response("PROGRESS", json!({ "step": "b" })),
            response("SUCCESS", json!({ "filename": "out.xlsm", "file_content": "QQ==" })),
        ] {
            assert!(poller.begin_tick());
            poller.finish_tick();
            match poller.observe(&resp) {
                PollSignal::Progress(_) => progress += 1,
                PollSignal::Succeeded(_) => success += 1,
                other => panic!("unexpected signal: {:?}", other),
            }
        }

        assert_eq!(progress, 2);
        assert_eq!(success, 1);
        assert_eq!(poller.phase(), PollPhase::Succeeded);
        // No further poll requests once terminal.
        assert!(!poller.begin_tick());
    }

    #[test]
    fn test_failure_on_first_tick() {
        let mut poller = PollerState::new();
        let signal = poller.observe(&response("FAILURE", json!({ "exc_message": "boom" })));
        assert_eq!(signal, PollSignal::Failed("boom".to_string()));
        assert_eq!(poller.phase(), PollPhase::Failed);
        // A late duplicate delivers nothing.
        assert_eq!(
            poller.observe(&bare("SUCCESS")),
            PollSignal::Continue
        );
    }

    #[test]
    fn test_pending_keeps_polling_silently() {
        let mut poller = PollerState::new();
        assert_eq!(poller.observe(&bare("PENDING")), PollSignal::Continue);
        assert_eq!(poller.observe(&bare("RETRY")), PollSignal::Continue);
        assert!(poller.should_poll());
    }

    #[test]
    fn test_cancel_suppresses_in_flight_response() {
        let mut poller = PollerState::new();
        assert!(poller.begin_tick());
        // The view is torn down while the request is in flight.
        poller.cancel();
        assert_eq!(poller.phase(), PollPhase::Cancelled);
        // The response lands anyway; it must produce no callback.
        assert_eq!(poller.observe(&bare("SUCCESS")), PollSignal::Continue);
        assert_eq!(poller.fail("network"), PollSignal::Continue);
        // Cancelling again is a no-op, not an error.
        poller.cancel();
        assert_eq!(poller.phase(), PollPhase::Cancelled);
    }

    #[test]
    fn test_cancel_after_success_is_noop() {
        let mut poller = PollerState::new();
        poller.observe(&response("SUCCESS", json!({})));
        poller.cancel();
        assert_eq!(poller.phase(), PollPhase::Succeeded);
    }

    #[test]
    fn test_overlap_guard_skips_tick() {
        let mut poller = PollerState::new();
        assert!(poller.begin_tick());
        // Timer fires again before the first request resolved.
        assert!(!poller.begin_tick());
        poller.finish_tick();
        assert!(poller.begin_tick());
    }

    #[test]
    fn test_transport_failure_is_terminal() {
        let mut poller = PollerState::new();
        let signal = poller.fail("Erro ao consultar o estado da tarefa.");
        assert!(matches!(signal, PollSignal::Failed(_)));
        assert!(!poller.should_poll());
    }
}
