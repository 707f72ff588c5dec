//! Diagnostic logging setup
//!
//! User-facing progress goes to stdout with `println!`. Diagnostics go
//! through `tracing` to stderr, filtered by `COMFYUP_LOG`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "COMFYUP_LOG";

/// Filter used when `COMFYUP_LOG` is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "comfyup=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
