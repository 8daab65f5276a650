//! Bounded best-effort reporting around command execution.
//!
//! `notify` spawns the report and hands back a [`NotificationHandle`];
//! `await_or_timeout` waits for that handle for at most the flush deadline.
//! A report that outlives the deadline is abandoned, not cancelled: it
//! finishes (or fails) on its own and nobody looks at the result.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use super::{AnalyticsClient, Invocation, DEFAULT_EXEMPT_COMMANDS, FLUSH_DURATION};

/// Completion signal of one report attempt.
///
/// The signal fires once, when the attempt has finished, whatever its
/// outcome. Exempt invocations get a handle that is already complete.
#[must_use = "a notification handle does nothing unless awaited"]
#[derive(Debug)]
pub struct NotificationHandle {
    done: Option<oneshot::Receiver<()>>,
}

impl NotificationHandle {
    fn completed() -> Self {
        Self { done: None }
    }

    /// Non-blocking check of the completion signal.
    pub fn is_complete(&mut self) -> bool {
        let Some(rx) = self.done.as_mut() else {
            return true;
        };
        match rx.try_recv() {
            Err(oneshot::error::TryRecvError::Empty) => false,
            // The receiver is spent once it has observed completion.
            _ => {
                self.done = None;
                true
            }
        }
    }

    async fn finished(self) {
        if let Some(rx) = self.done {
            // A dropped sender (panicked report) counts as finished too.
            let _ = rx.await;
        }
    }
}

/// Decouples "notify the analytics backend" from "run the command".
#[derive(Clone)]
pub struct TelemetryBarrier {
    client: Arc<dyn AnalyticsClient>,
    exempt: Arc<HashSet<String>>,
    flush_deadline: Duration,
}

impl TelemetryBarrier {
    /// Barrier with the default exemption set and [`FLUSH_DURATION`].
    pub fn new(client: Arc<dyn AnalyticsClient>) -> Self {
        Self {
            client,
            exempt: Arc::new(
                DEFAULT_EXEMPT_COMMANDS
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            ),
            flush_deadline: FLUSH_DURATION,
        }
    }

    pub fn with_flush_deadline(mut self, deadline: Duration) -> Self {
        self.flush_deadline = deadline;
        self
    }

    /// Replace the exemption set.
    pub fn with_exemptions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt = Arc::new(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn flush_deadline(&self) -> Duration {
        self.flush_deadline
    }

    pub fn is_exempt(&self, command: &str) -> bool {
        self.exempt.contains(command)
    }

    /// Start reporting `invocation` without waiting for it.
    ///
    /// Exempt and unnamed invocations, and calls made outside a Tokio
    /// runtime, start nothing and return an already-complete handle.
    pub fn notify(&self, invocation: &Invocation) -> NotificationHandle {
        let name = invocation.command();
        if name.is_empty() {
            tracing::debug!("Skipping usage report for unnamed command");
            return NotificationHandle::completed();
        }
        if self.is_exempt(name) {
            tracing::trace!(command = %name, "Command reports its own usage");
            return NotificationHandle::completed();
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(command = %name, "No async runtime, skipping usage report");
            return NotificationHandle::completed();
        };

        let (tx, rx) = oneshot::channel();
        let client = Arc::clone(&self.client);
        let name = name.to_string();
        let params = invocation.params().clone();
        runtime.spawn(async move {
            if let Err(e) = client.screenview(&name, &params).await {
                tracing::debug!(command = %name, error = %e, "Usage report failed");
            }
            let _ = tx.send(());
        });

        NotificationHandle { done: Some(rx) }
    }

    /// Wait for `handle` to complete or for the flush deadline, whichever
    /// comes first. The caller cannot tell which one happened.
    pub async fn await_or_timeout(&self, handle: NotificationHandle) {
        if tokio::time::timeout(self.flush_deadline, handle.finished())
            .await
            .is_err()
        {
            tracing::debug!(
                deadline_ms = self.flush_deadline.as_millis() as u64,
                "Usage report still in flight, not waiting any longer"
            );
        }
    }

    /// Run `behavior` with a usage report around it.
    ///
    /// The report starts before `behavior` is polled and is awaited (bounded)
    /// after it completes. The behavior's output is returned untouched.
    pub async fn track<F>(&self, invocation: &Invocation, behavior: F) -> F::Output
    where
        F: Future,
    {
        let handle = self.notify(invocation);
        let output = behavior.await;
        self.await_or_timeout(handle).await;
        output
    }
}
