//! Short-lived shortcut notification.

use crate::constants::TOAST_DURATION;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ToastState {
    message: String,
    shown_at: Option<Instant>,
    duration: Duration,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::with_duration(TOAST_DURATION)
    }
}

impl ToastState {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            message: String::new(),
            shown_at: None,
            duration,
        }
    }

    /// Show `message`, restarting the timeout if a toast is already up.
    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.message = message.into();
        self.shown_at = Some(now);
    }

    /// Message to draw at `now`, hiding the toast once it has expired
    pub fn visible_message(&mut self, now: Instant) -> Option<&str> {
        let shown_at = self.shown_at?;
        if now.saturating_duration_since(shown_at) >= self.duration {
            self.shown_at = None;
            return None;
        }
        Some(&self.message)
    }
}
