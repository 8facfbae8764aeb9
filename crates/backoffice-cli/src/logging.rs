//! Tracing setup for the CLI.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "backoffice=warn,backoffice_cli=warn";
const VERBOSE_LOG_FILTER: &str = "backoffice=debug,backoffice_cli=debug";

/// Log to stderr so command output stays clean on stdout.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` switches to debug.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
