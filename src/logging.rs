//! Diagnostic logging setup.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `safename=trace`
pub const LOG_ENV: &str = "SAFENAME_LOG";

/// Install the global subscriber.
///
/// Diagnostics go to stderr so stdout carries only the rename report.
/// `SAFENAME_LOG` wins over the verbose flag when set.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "safename=debug" } else { "warn" };
    let filter_layer =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .init();
}
