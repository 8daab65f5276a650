use clap::Args;

#[allow(dead_code)]
#[derive(Args)]
pub struct UpdateArgs {
    /// Show what would change without applying it
    #[arg(long, conflicts_with = "force")]
    pub noop: bool,
    /// Apply the update without prompting
    #[arg(long)]
    pub force: bool,
}
