//! # Keyboard Shortcuts
//!
//! Maps Ctrl-key chords to [`ShortcutAction`]s. The handler only decides what
//! should happen; the app applies the actions, so the mapping stays testable
//! without a window.

use crate::constants::EXIT_GRACE_PERIOD;
use crate::logger::log;
use egui::{Event, Key, Modifiers};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutAction {
    CycleClockDesign,
    ToggleAutoChange,
    ToggleShuffle,
    ShowCityDialog,
    ExitApplication,
    /// Toggle closing the app on pointer movement or Ctrl + X
    ToggleExitOnInput,
    OpenSettings,
    ShowHelp,
    ToggleTheme,
    ShowToast(String),
}

/// App state the handler needs to decide on an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEventState {
    pub exit_on_input_enabled: bool,
}

impl Default for KeyEventState {
    fn default() -> Self {
        Self {
            exit_on_input_enabled: true,
        }
    }
}

/// Chords and descriptions shown in the help dialog
pub const SHORTCUTS: [(&str, &str); 9] = [
    ("Ctrl + C", "Open Settings"),
    ("Ctrl + H", "Show Help"),
    ("Ctrl + N", "Cycle Clock Design"),
    ("Ctrl + P", "Toggle Auto-Change"),
    ("Ctrl + R", "Toggle Shuffle Mode"),
    ("Ctrl + T", "Toggle Theme (Light/Dark)"),
    ("Ctrl + S", "Show City Selection"),
    ("Ctrl + Z", "Toggle Exit on Input"),
    ("Ctrl + X", "Exit (when exit on input is on)"),
];

/// Actions for a key event. An empty list means the event is not a shortcut.
///
/// Only key presses with Ctrl held are considered. Every recognised chord
/// also yields a toast naming it.
pub fn handle_key(key: Key, pressed: bool, modifiers: Modifiers, state: &KeyEventState) -> Vec<ShortcutAction> {
    if !pressed || !modifiers.ctrl {
        return Vec::new();
    }

    let toast = ShortcutAction::ShowToast(format!("Ctrl + {}", key.name()));
    match key {
        Key::N => vec![ShortcutAction::CycleClockDesign, toast],
        Key::P => vec![ShortcutAction::ToggleAutoChange, toast],
        Key::R => vec![ShortcutAction::ToggleShuffle, toast],
        Key::S => vec![ShortcutAction::ShowCityDialog, toast],
        Key::Z => vec![ShortcutAction::ToggleExitOnInput, toast],
        Key::C => vec![ShortcutAction::OpenSettings, toast],
        Key::H => vec![ShortcutAction::ShowHelp, toast],
        Key::T => vec![ShortcutAction::ToggleTheme, toast],
        Key::X => {
            if state.exit_on_input_enabled {
                vec![toast, ShortcutAction::ExitApplication]
            } else {
                log::info!("Exit is disabled. Use Ctrl + Z to enable.");
                vec![toast]
            }
        }
        _ => Vec::new(),
    }
}

/// Actions for one frame of egui input events.
///
/// egui delivers Ctrl+C and Ctrl+X as clipboard events rather than key
/// events, so those are mapped back to their chords. Nothing is handled while
/// a text field has keyboard focus.
pub fn handle_events(events: &[Event], typing: bool, state: &KeyEventState) -> Vec<ShortcutAction> {
    if typing {
        return Vec::new();
    }

    let mut actions = Vec::new();
    for event in events {
        match event {
            Event::Key {
                key,
                pressed,
                modifiers,
                ..
            } => actions.extend(handle_key(*key, *pressed, *modifiers, state)),
            Event::Copy => actions.extend(handle_key(Key::C, true, Modifiers::CTRL, state)),
            Event::Cut => actions.extend(handle_key(Key::X, true, Modifiers::CTRL, state)),
            _ => {}
        }
    }
    actions
}

/// Whether pointer movement should close the app.
///
/// Requires exit-on-input, no open dialog, and the start-up grace period to
/// have passed.
pub fn should_exit_on_pointer(state: &KeyEventState, dialog_open: bool, since_start: Duration) -> bool {
    state.exit_on_input_enabled && !dialog_open && since_start >= EXIT_GRACE_PERIOD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_names_the_chord() {
        let actions = handle_key(Key::N, true, Modifiers::CTRL, &KeyEventState::default());
        assert_eq!(
            actions,
            vec![
                ShortcutAction::CycleClockDesign,
                ShortcutAction::ShowToast("Ctrl + N".to_string())
            ]
        );
    }

    #[test]
    fn release_and_unmodified_keys_are_ignored() {
        let state = KeyEventState::default();
        assert!(handle_key(Key::N, false, Modifiers::CTRL, &state).is_empty());
        assert!(handle_key(Key::N, true, Modifiers::NONE, &state).is_empty());
        assert!(handle_key(Key::N, true, Modifiers::SHIFT, &state).is_empty());
        assert!(handle_key(Key::Q, true, Modifiers::CTRL, &state).is_empty());
    }
}
