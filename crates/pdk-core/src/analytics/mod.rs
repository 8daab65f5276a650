//! Best-effort usage analytics for command invocations.
//!
//! Every concluded command produces one screen-view report. Reports run on
//! their own task and the command only waits for them up to
//! [`FLUSH_DURATION`]; a slow or unreachable backend costs at most that much
//! latency and never changes the command's output or exit code.

mod barrier;
mod client;

pub use barrier::{NotificationHandle, TelemetryBarrier};
pub use client::{from_config, AnalyticsClient, Disabled, GoogleAnalytics};

use std::collections::BTreeMap;
use std::time::Duration;

/// Maximum time a command waits for its report before exiting anyway.
pub const FLUSH_DURATION: Duration = Duration::from_millis(500);

/// Commands whose analytics the server process sends during its own startup.
pub const DEFAULT_EXEMPT_COMMANDS: &[&str] = &["wash", "server"];

/// Extra key/value pairs attached to a report.
pub type Params = BTreeMap<String, String>;

/// One user-triggered command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: String,
    params: Params,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Leaf command name, e.g. `fact` for `pdk new fact`.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}
