use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";

/// Install the stderr subscriber.
///
/// `PDK_LOG` (full `EnvFilter` syntax) wins over `--log-level`, which wins
/// over the default of `warn`.
pub fn init(cli_level: Option<&str>) {
    let filter = EnvFilter::try_from_env("PDK_LOG").unwrap_or_else(|_| {
        cli_level
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
