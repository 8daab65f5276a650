use clap::Args;

/// Puppet version selection shared by commands that pick a Ruby/Puppet pair.
#[allow(dead_code)]
#[derive(Args)]
pub struct PuppetVersionArgs {
    /// Puppet version to target
    #[arg(long, value_name = "VERSION", conflicts_with_all = ["pe_version", "puppet_dev"])]
    pub puppet_version: Option<String>,
    /// Puppet Enterprise version to target
    #[arg(long, value_name = "VERSION", conflicts_with = "puppet_dev")]
    pub pe_version: Option<String>,
    /// Use the Puppet development source
    #[arg(long)]
    pub puppet_dev: bool,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub puppet: PuppetVersionArgs,
}
