use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::config::PollConfig;
use crate::error::{ErrorKind, WatchError};
use crate::review::client::ReviewClient;
use crate::review::types::StatusResponse;
use crate::status::format_status;
use crate::telegram::Notifier;

pub const NO_UPDATES_TEXT: &str = "No homework updates yet.";

/// Per-cycle bookkeeping. Counters reset whenever the cycle outcome changes
/// kind, so the chat sees one message per streak instead of one per cycle.
#[derive(Debug, Default)]
pub struct PollState {
    no_update_count: u32,
    error_count: u32,
    last_error: Option<ErrorKind>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cycle delivered records: every streak ends.
    fn record_updates(&mut self) {
        self.no_update_count = 0;
        self.error_count = 0;
        self.last_error = None;
    }

    /// A clean cycle with an empty list. True when the "no updates" notice
    /// should go out (first empty cycle of the streak).
    fn record_empty(&mut self) -> bool {
        self.error_count = 0;
        self.last_error = None;
        self.no_update_count += 1;
        self.no_update_count == 1
    }

    /// A failed cycle. True when the failure should be notified: start of a
    /// streak, or the failure kind changed mid-streak.
    fn record_error(&mut self, kind: ErrorKind) -> bool {
        self.no_update_count = 0;
        self.error_count += 1;
        let notify = self.last_error != Some(kind);
        self.last_error = Some(kind);
        notify
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }
}

/// One fetch → validate → format → notify pass. Returns the cursor for the
/// next cycle; any error aborts the whole cycle before anything is sent.
async fn poll_cycle(
    client: &ReviewClient,
    notifier: &Notifier,
    state: &mut PollState,
    from_date: i64,
) -> Result<i64, WatchError> {
    let payload = client.homework_statuses(from_date).await?;
    let resp = StatusResponse::from_payload(payload)?;

    if resp.homeworks.is_empty() {
        info!(from_date, "No homework updates");
        if state.record_empty() {
            if let Err(e) = notifier.send(NO_UPDATES_TEXT).await {
                warn!(error = %e, "Failed to deliver no-updates notice");
            }
        }
    } else {
        // Format every record up front: one unknown status aborts the cycle
        // before any partial batch reaches the chat.
        let mut messages = Vec::with_capacity(resp.homeworks.len());
        for homework in &resp.homeworks {
            messages.push(format_status(homework)?);
        }
        state.record_updates();
        for message in &messages {
            info!(text = %message, "Homework status changed");
            if let Err(e) = notifier.send(message).await {
                warn!(error = %e, "Failed to deliver status notification");
            }
        }
    }

    Ok(resp.current_date.unwrap_or_else(|| Utc::now().timestamp()))
}

/// One loop iteration including failure bookkeeping. Returns the seconds to
/// sleep before the next iteration.
pub async fn run_once(
    client: &ReviewClient,
    notifier: &Notifier,
    poll: &PollConfig,
    state: &mut PollState,
    from_date: &mut i64,
) -> u64 {
    match poll_cycle(client, notifier, state, *from_date).await {
        Ok(next) => {
            *from_date = next;
            poll.interval_secs
        }
        Err(e) => {
            let notify = state.record_error(e.kind());
            error!(
                kind = %e.kind(),
                consecutive_failures = state.error_count(),
                error = %e,
                "Poll cycle failed"
            );
            if notify {
                let text = format!("Program failure: {e}");
                if let Err(send_err) = notifier.send(&text).await {
                    warn!(error = %send_err, "Failed to deliver failure notification");
                }
            }
            poll.error_retry_secs
        }
    }
}

/// Poll forever: fixed interval after a clean cycle, shorter fixed interval
/// after a failed one. No backoff, no retry cap.
pub async fn run(
    client: &ReviewClient,
    notifier: &Notifier,
    poll: &PollConfig,
    running: &AtomicBool,
) {
    let mut state = PollState::new();
    let mut from_date = Utc::now().timestamp() - poll.lookback_secs;

    while running.load(Ordering::SeqCst) {
        let sleep_secs = run_once(client, notifier, poll, &mut state, &mut from_date).await;

        // Sleep with early exit on shutdown
        for _ in 0..sleep_secs {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            sleep(Duration::from_secs(1)).await;
        }
    }
}
