use clap::Args;

#[allow(dead_code)]
#[derive(Args)]
pub struct BundleArgs {
    /// Arguments handed to bundler unchanged
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}
