use clap::{Args, Subcommand};

#[allow(dead_code)]
#[derive(Subcommand)]
pub enum ReleaseAction {
    /// Prepare a module for release without publishing it
    Prep(PrepArgs),
    /// Publish a built module to the Forge
    Publish(PublishArgs),
}

#[allow(dead_code)]
#[derive(Args)]
pub struct ReleaseArgs {
    #[command(subcommand)]
    pub action: Option<ReleaseAction>,
    #[command(flatten)]
    pub prep: PrepArgs,
    /// Forge API token
    #[arg(long, value_name = "TOKEN")]
    pub forge_token: Option<String>,
    /// Forge upload URL
    #[arg(long, value_name = "URL")]
    pub forge_upload_url: Option<String>,
    /// Skip building the package
    #[arg(long)]
    pub skip_build: bool,
    /// Skip publishing to the Forge
    #[arg(long)]
    pub skip_publish: bool,
    /// Path to an already built package
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct PrepArgs {
    /// Release without prompting
    #[arg(long)]
    pub force: bool,
    /// Skip module validation
    #[arg(long)]
    pub skip_validation: bool,
    /// Skip changelog generation
    #[arg(long)]
    pub skip_changelog: bool,
    /// Skip the dependency check
    #[arg(long)]
    pub skip_dependency: bool,
    /// Skip documentation generation
    #[arg(long)]
    pub skip_documentation: bool,
    /// Version to release (default: from metadata.json)
    #[arg(long = "version", value_name = "VERSION")]
    pub release_version: Option<String>,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct PublishArgs {
    /// Publish without prompting
    #[arg(long)]
    pub force: bool,
    /// Forge API token
    #[arg(long, value_name = "TOKEN")]
    pub forge_token: Option<String>,
    /// Forge upload URL
    #[arg(long, value_name = "URL")]
    pub forge_upload_url: Option<String>,
    /// Path to an already built package
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,
}
