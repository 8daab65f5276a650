use clap::Args;

#[allow(dead_code)]
#[derive(Args)]
pub struct ConvertArgs {
    /// Show what would change without applying it
    #[arg(long, conflicts_with = "force")]
    pub noop: bool,
    /// Convert without prompting
    #[arg(long)]
    pub force: bool,
    /// Only ask for information that cannot be determined automatically
    #[arg(long, conflicts_with = "full_interview")]
    pub skip_interview: bool,
    /// Ask for every metadata question
    #[arg(long)]
    pub full_interview: bool,
    /// Template to convert the module to
    #[arg(long, value_name = "URL")]
    pub template_url: Option<String>,
    /// Git ref of the template
    #[arg(long, value_name = "REF")]
    pub template_ref: Option<String>,
    /// Add missing tests for existing classes and defined types
    #[arg(long)]
    pub add_tests: bool,
    /// Convert to the default template
    #[arg(long, conflicts_with = "template_url")]
    pub default_template: bool,
}
