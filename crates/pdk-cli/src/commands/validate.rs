use clap::Args;

use super::env::PuppetVersionArgs;

#[allow(dead_code)]
#[derive(Args)]
pub struct ValidateArgs {
    /// Validators to run (comma separated, e.g. metadata,puppet) followed by
    /// the files or directories to validate
    #[arg(value_name = "VALIDATORS|TARGETS")]
    pub targets: Vec<String>,
    /// List all available validators
    #[arg(long)]
    pub list: bool,
    /// Report format, optionally followed by :<target file>
    #[arg(long, value_name = "FORMAT[:TARGET]")]
    pub format: Vec<String>,
    /// Run validations in parallel
    #[arg(short = 'p', long)]
    pub parallel: bool,
    /// Automatically correct problems where possible
    #[arg(short = 'a', long)]
    pub auto_correct: bool,
    #[command(flatten)]
    pub puppet: PuppetVersionArgs,
}
