//! # Glowclock - Ambient Fullscreen Clock
//!
//! Starts the logger and the tokio runtime, loads preferences and opens the
//! clock window.
//!
//! ## Environment
//!
//! - `WEATHERAPI`: weatherapi.com key
//! - `RUST_LOG`: log filter, e.g. `glowclock=trace`
//! - `GLOWCLOCK_WINDOWED`: open a maximized window instead of fullscreen
//! - `GLOWCLOCK_EPHEMERAL`: keep preferences in memory only

use eframe::egui::{ViewportBuilder, WindowLevel};
use glowclock::config::ClockConfig;
use glowclock::constants::{EPHEMERAL_ENV, WINDOWED_ENV};
use glowclock::gui::app::GlowclockApp;
use glowclock::logger::{self, log};
use glowclock::settings::{FilePreferences, InMemoryPreferences, PreferencesRepository};
use std::sync::Arc;

/// Application entry point
///
/// Logger and runtime failures abort start-up. A missing or broken
/// configuration file only means starting from defaults.
fn main() -> eframe::Result<()> {
    logger::init_logger().expect("Failed to initialize logger");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("glowclock-worker")
        .enable_all()
        .build()
        .expect("Failed to start async runtime");

    let config = ClockConfig::load();
    let preferences: Arc<dyn PreferencesRepository> = if std::env::var_os(EPHEMERAL_ENV).is_some() {
        log::info!("{} set, preferences will not be saved", EPHEMERAL_ENV);
        Arc::new(InMemoryPreferences::new(config.preferences.clone()))
    } else {
        match ClockConfig::config_path() {
            Ok(path) => Arc::new(FilePreferences::with_config(path, config.clone())),
            Err(e) => {
                log::warn!("No config location ({}), preferences will not be saved", e);
                Arc::new(InMemoryPreferences::new(config.preferences.clone()))
            }
        }
    };

    let viewport = ViewportBuilder::default()
        .with_title("Glowclock")
        .with_decorations(false)
        .with_window_level(WindowLevel::AlwaysOnTop);
    let viewport = if std::env::var_os(WINDOWED_ENV).is_some() {
        log::info!("Windowed mode");
        viewport.with_maximized(true)
    } else {
        viewport.with_fullscreen(true)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Glowclock",
        options,
        Box::new(move |cc| Ok(Box::new(GlowclockApp::new(cc, runtime, preferences, &config.weather)))),
    )
}
