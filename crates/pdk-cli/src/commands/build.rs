use clap::Args;

#[allow(dead_code)]
#[derive(Args)]
pub struct BuildArgs {
    /// Skip the prompt and replace an existing package
    #[arg(long)]
    pub force: bool,
    /// Directory to write the package to (default: <module>/pkg)
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<String>,
}
