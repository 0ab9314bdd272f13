//! Logging configuration using tracing
//!
//! Log lines go to stderr so they never mix with JSON printed on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` for
/// this crate when `verbose` is on.
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let default_directive = if verbose { "warn,learncat=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_helper() {
        // Should never panic
        init_test();
        init_test();
    }

    #[test]
    fn test_second_init_fails() {
        init_test();
        assert!(init(true).is_err());
    }
}
