use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,admin_cli=info,admin_console=info,admin_client=info";
const VERBOSE_FILTER: &str = "info,admin_cli=debug,admin_console=debug,admin_client=debug";

/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the default filter.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose);

    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    tracing::debug!("Logging initialized");
}
