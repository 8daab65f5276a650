//! Command tree registration.
//!
//! Most commands only declare their arguments: clap validates the command
//! line and renders help, then the raw argv is forwarded to the external PDK
//! program. Argument types for forwarded commands are therefore parsed but
//! never read back, and carry `#[allow(dead_code)]` individually.

pub mod build;
pub mod bundle;
pub mod completion;
pub mod config;
pub mod console;
pub mod convert;
pub mod env;
pub mod new;
pub mod release;
pub mod update;
pub mod validate;
pub mod version;
