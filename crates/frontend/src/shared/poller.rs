//! Browser driver for the task poller.
//!
//! The loop fetches `task-status/{id}/`, feeds the response through
//! [`PollerState`] and only then sleeps, so a second request can never be in
//! flight while the first is pending. The returned [`PollerHandle`] lets the
//! page cancel on teardown or before starting a replacement task; a response
//! that lands after `cancel()` produces no callback.

use std::cell::RefCell;
use std::rc::Rc;

use contracts::tasks::{PollSignal, PollerState, ProgressMeta, TaskStatusResponse};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

use super::api;

/// Poll cadence of the spreadsheet and organizer tasks.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 3000;
/// Poll cadence of the image extraction task.
pub const FAST_POLL_INTERVAL_MS: u32 = 2000;

#[derive(Clone)]
pub struct PollerHandle {
    state: Rc<RefCell<PollerState>>,
}

impl PollerHandle {
    pub fn cancel(&self) {
        self.state.borrow_mut().cancel();
    }
}

/// Starts watching `task_id`. `on_progress` may run many times;
/// `on_success` and `on_failure` run at most once between them, after which
/// the loop exits.
pub fn start_polling(
    task_id: String,
    interval_ms: u32,
    on_progress: impl Fn(ProgressMeta) + 'static,
    on_success: impl FnOnce(Option<serde_json::Value>) + 'static,
    on_failure: impl FnOnce(String) + 'static,
) -> PollerHandle {
    let state = Rc::new(RefCell::new(PollerState::new()));
    let handle = PollerHandle {
        state: state.clone(),
    };

    spawn_local(async move {
        let mut on_success = Some(on_success);
        let mut on_failure = Some(on_failure);
        loop {
            if !state.borrow_mut().begin_tick() {
                break;
            }

            let path = format!("/task-status/{}/", task_id);
            let fetched = api::get_json::<TaskStatusResponse>(&path).await;

            let signal = {
                let mut poller = state.borrow_mut();
                poller.finish_tick();
                match fetched {
                    Ok(response) => poller.observe(&response),
                    Err(e) => {
                        log::error!("task {} status query failed: {}", task_id, e);
                        poller.fail("Erro ao consultar o estado da tarefa.")
                    }
                }
            };

            match signal {
                PollSignal::Continue => {}
                PollSignal::Progress(meta) => on_progress(meta),
                PollSignal::Succeeded(result) => {
                    if let Some(callback) = on_success.take() {
                        callback(result);
                    }
                    break;
                }
                PollSignal::Failed(message) => {
                    if let Some(callback) = on_failure.take() {
                        callback(message);
                    }
                    break;
                }
            }

            if !state.borrow().should_poll() {
                break;
            }
            TimeoutFuture::new(interval_ms).await;
        }
    });

    handle
}
