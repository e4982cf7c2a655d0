use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging for the command-line front-end.
///
/// # Configuration
///
/// - **Filter**: `RUST_LOG` when set; otherwise `LOG_LEVEL` (default: "warn")
///   applied to the schoolgate crates
/// - **Verbose**: `verbose = true` raises the default level to "debug"
/// - **Output**: compact format on stderr so command output on stdout stays clean
pub fn init_console_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level.to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{krate}={level},schoolgate_session={level},schoolgate_auth={level}",
            krate = env!("CARGO_CRATE_NAME"),
            level = log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_filter(env_filter);

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
