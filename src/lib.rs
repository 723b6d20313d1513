//! # Glowclock
//!
//! A fullscreen ambient digital clock with current weather, meant to run as
//! a screensaver.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   GUI Module    │    │  Clock Module   │    │ Weather Module  │
//! │                 │    │                 │    │                 │
//! │ • Clock Face    │◄──►│ • Designs       │    │ • WeatherAPI    │
//! │ • Dialogs       │    │ • Auto-change   │    │ • City Search   │
//! │ • Shortcuts     │    │ • Shuffle       │    │ • Load States   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!           │                       │                       │
//!           └───────────────────────┼───────────────────────┘
//!                                   │
//!                          ┌─────────────────┐
//!                          │ Settings Module │
//!                          │                 │
//!                          │ • Preferences   │
//!                          │ • TOML Storage  │
//!                          └─────────────────┘
//! ```
//!
//! The controllers ([`clock::ClockController`], [`weather::WeatherController`])
//! run their background work on a tokio runtime and can be driven without a
//! window, which is how the integration tests exercise them.

pub mod clock;
pub mod config;
pub mod constants;
pub mod gui;
pub mod location;
pub mod logger;
pub mod settings;
pub mod shortcuts;
pub mod weather;
