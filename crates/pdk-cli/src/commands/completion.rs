use clap::{Args, Command};
use clap_complete::Shell;

#[derive(Args)]
pub struct CompletionArgs {
    /// Shell to generate the completion script for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionArgs, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, cmd, name, &mut std::io::stdout());
}
