//! Diagnostic logging
//!
//! Tracing output goes to stderr and never mixes with the report on stdout.
//! `RUST_LOG` takes precedence over `--quiet`/`--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Defaults to `warn`, `error` with `--quiet`, `debug` with `--verbose`.
///
/// # Example
/// ```bash
/// RUST_LOG=copyproj=debug copyproj ../Proj ../NewProj
/// ```
pub fn init(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
