//! # PDK front-end core library
//!
//! Everything the `pdk` binary needs besides its command tree:
//!
//! - **Analytics**: a telemetry barrier that reports each command invocation
//!   to a usage-analytics backend without ever blocking the command for more
//!   than a fixed flush deadline
//! - **Storage**: TOML configuration under `~/.config/pdk/`
//! - **Exec**: forwarding of the actual work to the external PDK program
//!
//! ## Key Components
//!
//! - [`TelemetryBarrier`]: bounded best-effort reporting around a command
//! - [`AnalyticsClient`]: trait for reporting backends
//! - [`Config`]: front-end configuration management
//! - [`PdkExecutor`]: runs the external PDK program

pub mod analytics;
pub mod error;
pub mod exec;
pub mod storage;

pub use analytics::{AnalyticsClient, Invocation, NotificationHandle, Params, TelemetryBarrier};
pub use error::{AnalyticsError, ConfigError, CoreError, ExecError};
pub use exec::PdkExecutor;
pub use storage::Config;
