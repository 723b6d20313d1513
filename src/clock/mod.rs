//! # Clock Module
//!
//! Which of the eight clock faces is shown, how it advances, and how the
//! current time is broken into displayable parts.
//!
//! [`DesignState`] is the plain state machine; [`ClockController`] owns it
//! behind a mutex and drives the auto-change timer on the tokio runtime.

pub mod controller;
pub mod designs;

pub use controller::ClockController;
pub use designs::{ClockDesign, DESIGNS};

use crate::constants::DESIGN_COUNT;
use chrono::Timelike;
use rand::Rng;

/// Whether `design_id` names one of the available designs (1-8)
pub fn is_valid_design(design_id: u8) -> bool {
    (1..=DESIGN_COUNT).contains(&design_id)
}

/// Design selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignState {
    design_id: u8,
    auto_change_enabled: bool,
    shuffle_enabled: bool,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            design_id: 1,
            auto_change_enabled: false,
            shuffle_enabled: false,
        }
    }
}

impl DesignState {
    pub fn design_id(&self) -> u8 {
        self.design_id
    }

    pub fn auto_change_enabled(&self) -> bool {
        self.auto_change_enabled
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Advance to the next design, wrapping from 8 back to 1.
    pub fn cycle(&mut self) -> u8 {
        self.design_id = (self.design_id % DESIGN_COUNT) + 1;
        self.design_id
    }

    /// Select a design. Out-of-range ids leave the state unchanged.
    pub fn set_design(&mut self, design_id: u8) -> bool {
        if is_valid_design(design_id) {
            self.design_id = design_id;
            true
        } else {
            false
        }
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle_enabled = !self.shuffle_enabled;
        self.shuffle_enabled
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle_enabled = enabled;
    }

    pub(crate) fn set_auto_change(&mut self, enabled: bool) {
        self.auto_change_enabled = enabled;
    }

    /// One auto-change step: a random other design in shuffle mode,
    /// otherwise the next one in order.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        if self.shuffle_enabled {
            self.design_id = random_other_design(self.design_id, rng);
            self.design_id
        } else {
            self.cycle()
        }
    }
}

/// Uniformly pick a design from 1-8 other than `current`.
fn random_other_design<R: Rng + ?Sized>(current: u8, rng: &mut R) -> u8 {
    // Draw from the seven remaining slots and skip over the current id.
    let pick = rng.gen_range(1..DESIGN_COUNT);
    if is_valid_design(current) && pick >= current {
        pick + 1
    } else {
        pick
    }
}

/// Time of day split into the parts a clock face displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    /// Hour as shown: 0-23 in 24-hour mode, 1-12 otherwise
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Before noon. Meaningful in both modes; only shown in 12-hour mode.
    pub is_am: bool,
}

impl ClockTime {
    pub fn new<T: Timelike>(time: &T, use_24_hour: bool) -> Self {
        let hour24 = time.hour();
        let hour = if use_24_hour {
            hour24
        } else {
            match hour24 % 12 {
                0 => 12,
                h => h,
            }
        };

        Self {
            hour,
            minute: time.minute(),
            second: time.second(),
            is_am: hour24 < 12,
        }
    }

    /// The four digits `HH:MM`, tens first
    pub fn digits(&self) -> [u32; 4] {
        [
            (self.hour / 10) % 10,
            self.hour % 10,
            (self.minute / 10) % 10,
            self.minute % 10,
        ]
    }
}
