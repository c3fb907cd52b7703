//! Tracing setup.
//!
//! The renderer only emits `tracing` events; applications that have no
//! subscriber of their own can call [`install_tracing`] to print them.

use std::str::FromStr;
use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter, e.g. `hyperons=debug`.
pub const LOG_ENV: &str = "HYPERONS_LOG";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INSTALLED: Once = Once::new();

/// Parses a level name, falling back to `info` for unknown names.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(DEFAULT_LOG_LEVEL)
}

fn env_filter() -> EnvFilter {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return EnvFilter::default().add_directive(DEFAULT_LOG_LEVEL.into());
    };
    EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(&directives).into()))
}

/// Installs a formatting subscriber filtered by [`LOG_ENV`] (idempotent).
///
/// Returns `true` if this call installed the subscriber. Later calls, and calls
/// made after another global subscriber was set, return `false`.
pub fn install_tracing() -> bool {
    let mut installed = false;
    TRACING_INSTALLED.call_once(|| {
        let result = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(env_filter())
            .try_init();

        match result {
            Ok(()) => installed = true,
            Err(error) => eprintln!("hyperons tracing subscriber failed to initialize: {error}"),
        }
    });
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN "), LevelFilter::WARN);
        assert_eq!(parse_level("loud"), LevelFilter::INFO);
    }

    #[test]
    fn test_install_is_idempotent() {
        let _ = install_tracing();
        assert!(!install_tracing());
    }
}
