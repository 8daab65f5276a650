use std::io::Write;

use clap::error::ErrorKind;
use clap::{Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use pdk_core::analytics;
use pdk_core::{Config, CoreError, Invocation, PdkExecutor, TelemetryBarrier};

mod commands;
mod lifecycle;
mod logging;

use commands::build::BuildArgs;
use commands::bundle::BundleArgs;
use commands::completion::CompletionArgs;
use commands::console::ConsoleArgs;
use commands::convert::ConvertArgs;
use commands::env::EnvArgs;
use commands::release::ReleaseArgs;
use commands::update::UpdateArgs;
use commands::validate::ValidateArgs;
use lifecycle::{Conclusion, RootFlags};

#[derive(Parser)]
#[command(name = "pdk", about = "Puppet Development Kit")]
struct Cli {
    /// Log level of the pdk front-end
    #[arg(long, value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,
    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

// Payloads of forwarded commands only drive validation and help.
#[allow(dead_code)]
#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
    /// Generate a shell completion script
    Completion(CompletionArgs),
    /// Run tests
    Test {
        #[command(subcommand)]
        action: commands::test::TestAction,
    },
    /// Build a module package for release on the Forge
    Build(BuildArgs),
    /// Convert an existing module to be compatible with the PDK
    Convert(ConvertArgs),
    /// Update a module created with or converted by the PDK
    Update(UpdateArgs),
    /// Release a module to the Forge
    Release(ReleaseArgs),
    /// Show the environment the PDK runs in
    Env(EnvArgs),
    /// Run static analysis on the module
    Validate(ValidateArgs),
    /// Set configuration values
    Set {
        #[command(subcommand)]
        action: commands::config::SetAction,
    },
    /// Retrieve configuration values
    Get {
        #[command(subcommand)]
        action: commands::config::GetAction,
    },
    /// Remove configuration values
    Remove {
        #[command(subcommand)]
        action: commands::config::RemoveAction,
    },
    /// Create a new module or module content from templates
    New {
        #[command(subcommand)]
        action: commands::new::NewAction,
    },
    /// Run bundler in the context of the module
    Bundle(BundleArgs),
    /// Start an interactive Puppet console
    Console(ConsoleArgs),
}

/// The full command tree, including the build-stamped version string.
pub(crate) fn build_command() -> Command {
    Cli::command().version(commands::version::format())
}

/// Config problems never stop a command; the worst case is no analytics.
fn load_config() -> Config {
    let mut config = Config::load_or_default();
    if let Err(e) = config.apply_env_overrides() {
        tracing::warn!(error = %e, "Invalid configuration, usage analytics disabled");
        config.analytics.disabled = true;
    }
    config
}

/// Run a parsed command: `version` and `completion` are answered here,
/// everything else is forwarded to the PDK program.
async fn run(
    command: Commands,
    forwarded: &[String],
    executor: &PdkExecutor,
    cmd: &mut Command,
) -> Result<i32, CoreError> {
    match command {
        Commands::Version => {
            commands::version::run()?;
            Ok(0)
        }
        Commands::Completion(args) => {
            commands::completion::run(args, cmd);
            Ok(0)
        }
        _ => Ok(executor.run(forwarded).await?),
    }
}

/// Help, usage errors and `--version`: print clap's rendering, reporting the
/// invocation unless it is untracked.
async fn conclude_early(
    cmd: &Command,
    args: &[String],
    barrier: &TelemetryBarrier,
    err: clap::Error,
) -> i32 {
    let conclusion = Conclusion::from_error(&err);
    // A group command reached without its subcommand shows its help.
    let err = match err.kind() {
        ErrorKind::MissingSubcommand => lifecycle::help_for(cmd, args).unwrap_or(err),
        _ => err,
    };
    let show = async {
        let _ = err.print();
        err.exit_code()
    };
    if !conclusion.is_tracked() {
        return show.await;
    }

    let invocation = Invocation::new(lifecycle::resolve_command_name(cmd, args));
    tracing::debug!(command = invocation.command(), ?conclusion, "Command concluded early");
    barrier.track(&invocation, show).await
}

async fn dispatch(
    args: &[String],
    forwarded: &[String],
    barrier: &TelemetryBarrier,
    executor: &PdkExecutor,
) -> i32 {
    let mut cmd = build_command();
    let (matches, cli) = match cmd.try_get_matches_from_mut(args) {
        Ok(matches) => match Cli::from_arg_matches(&matches) {
            Ok(cli) => (matches, cli),
            Err(err) => {
                let err = err.format(&mut cmd);
                return conclude_early(&cmd, args, barrier, err).await;
            }
        },
        Err(err) => return conclude_early(&cmd, args, barrier, err).await,
    };

    let invocation = Invocation::new(lifecycle::matched_command_name(&cmd, &matches));
    tracing::debug!(
        command = invocation.command(),
        conclusion = ?Conclusion::Run,
        debug = cli.debug,
        log_level = ?cli.log_level,
        "Dispatching"
    );

    barrier
        .track(&invocation, async {
            run(cli.command, forwarded, executor, &mut cmd)
                .await
                .unwrap_or_else(|e| {
                    eprintln!("error: {e}");
                    1
                })
        })
        .await
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let root_flags = RootFlags::scan(&args);
    logging::init(root_flags.log_level.as_deref());

    let config = load_config();
    let client = analytics::from_config(&config.analytics, env!("CARGO_PKG_VERSION"));
    let barrier =
        TelemetryBarrier::new(client).with_flush_deadline(config.analytics.flush_deadline());
    let executor = PdkExecutor::new(config.pdk.executable.as_str());

    let code = dispatch(&args, &root_flags.forwarded, &barrier, &executor).await;

    let _ = std::io::stdout().flush();
    std::process::exit(code);
}
