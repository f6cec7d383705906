//! Logging configuration.
//!
//! Replaces global verbose/debug switches: a `LogConfig` is handed to each
//! subsystem that emits diagnostics, and optionally to [`init_tracing`] once
//! at startup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Verbosity settings for diagnostics and the tracing subscriber.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LogConfig {
    /// Show informational output.
    pub verbose: bool,
    /// Record and show debug diagnostics.
    pub debug: bool,
}

impl LogConfig {
    /// Config with debug output enabled (implies verbose).
    pub fn debug() -> Self {
        LogConfig {
            verbose: true,
            debug: true,
        }
    }

    /// Config with verbose output enabled.
    pub fn verbose() -> Self {
        LogConfig {
            verbose: true,
            debug: false,
        }
    }

    /// `EnvFilter` directive matching this config.
    pub fn filter_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// Initialize a tracing subscriber for diagnostic output.
///
/// Call this once at startup. Safe to call multiple times; only the first
/// call has an effect. `RUST_LOG` overrides the level derived from `config`.
pub fn init_tracing(config: &LogConfig) {
    let directive = config.filter_directive();
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}
