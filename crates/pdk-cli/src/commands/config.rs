//! `get config`, `set config` and `remove config`.

use clap::{Args, Subcommand};

#[allow(dead_code)]
#[derive(Subcommand)]
pub enum GetAction {
    /// Show configuration values
    Config(GetConfigArgs),
}

#[allow(dead_code)]
#[derive(Subcommand)]
pub enum SetAction {
    /// Set a configuration value
    Config(SetConfigArgs),
}

#[allow(dead_code)]
#[derive(Subcommand)]
pub enum RemoveAction {
    /// Remove a configuration value
    Config(RemoveConfigArgs),
}

#[allow(dead_code)]
#[derive(Args)]
pub struct GetConfigArgs {
    /// Dot-separated key (e.g. user.analytics.disabled); all values when omitted
    pub name: Option<String>,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct SetConfigArgs {
    /// Dot-separated key
    pub name: String,
    /// New value
    pub value: String,
    /// Value type (string, number, boolean, array)
    #[arg(long = "type", visible_alias = "as", value_name = "TYPE")]
    pub value_type: Option<String>,
    /// Overwrite without prompting
    #[arg(long)]
    pub force: bool,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct RemoveConfigArgs {
    /// Dot-separated key
    pub name: String,
    /// Remove only this element from an array value
    pub value: Option<String>,
    /// Remove without prompting
    #[arg(long)]
    pub force: bool,
}
