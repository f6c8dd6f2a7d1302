//! Logging setup for the CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "datadict=warn";
const VERBOSE_LOG_FILTER: &str = "datadict=debug";

/// Initialize tracing on stderr. stdout carries only the written paths.
///
/// `RUST_LOG` wins over both defaults.
pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_LOG_FILTER } else { DEFAULT_LOG_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
