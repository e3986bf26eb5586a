//! Diagnostic logging setup
//!
//! Library code logs through `tracing` macros; the binary installs a single
//! stderr subscriber here.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "tally=warn",
        1 => "tally=info",
        _ => "tally=debug",
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Subsequent calls are no-ops.
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0), "tally=warn");
        assert_eq!(default_directive(1), "tally=info");
        assert_eq!(default_directive(2), "tally=debug");
        assert_eq!(default_directive(7), "tally=debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(2);
        tracing::debug!("logging initialised twice without panicking");
    }
}
