//! Tracing setup for the command line.
//!
//! Logs go to stderr so that stdout stays clean for `--json` and `--dry-run`
//! output. `RUST_LOG` wins over the `-v` count when it is set.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a given number of `-v` flags.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests driving the CLI in-process) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
