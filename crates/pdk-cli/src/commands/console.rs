use clap::Args;

use super::env::PuppetVersionArgs;

#[allow(dead_code)]
#[derive(Args)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub puppet: PuppetVersionArgs,
    /// Evaluate the given code and exit
    #[arg(long)]
    pub run_once: bool,
    /// Suppress the banner
    #[arg(long)]
    pub quiet: bool,
    /// Arguments handed to the console unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}
