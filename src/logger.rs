//! # Logging Infrastructure Module
//!
//! Centralized logging for Glowclock, built on the `tracing` ecosystem.
//! Timer ticks and weather requests run on tokio worker threads, so thread ids
//! are included in every line.
//!
//! ## Environment Configuration
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=glowclock=debug` - Show all logs from this application
//! - `RUST_LOG=warn` - Show only warnings and errors globally
//! - `RUST_LOG=glowclock::weather=debug,warn` - Debug weather fetching, warn others

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "glowclock=debug,warn";

/// Initialize the global logger.
///
/// Safe to call more than once: the subscriber is installed exactly once and
/// later calls are no-ops. If another subscriber is already installed (for
/// example by a test harness) the existing one is kept.
///
/// Should be called once from `main.rs`.
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    static INIT: Lazy<()> = Lazy::new(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init();
    });

    Lazy::force(&INIT);
    Ok(())
}

/// Convenience re-export of log macros
///
/// ```rust
/// use glowclock::logger::log;
///
/// log::info!("Clock design changed to {}", 3);
/// log::warn!("No city mapped for timezone {}", "Etc/UTC");
/// ```
pub mod log {
    pub use tracing::{debug, error, info, warn};
}
