//! Logging initialization
//!
//! Log records go to stderr so that stdout carries only command output (the
//! dependency list of `gather`, for instance).
//!
//! - `RUST_LOG` always wins
//! - otherwise `--verbose` selects `debug`
//! - otherwise `info` for this crate and `warn` for everything else

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "osgi_target=debug"
    } else {
        "osgi_target=info,warn"
    }
}

/// Install the global subscriber
pub fn init_logging(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_filter(verbose))
    };

    // try_init: tests may install a subscriber more than once
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time()
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .with(env_filter)
        .try_init();
}
