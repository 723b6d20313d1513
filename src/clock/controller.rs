//! Clock design controller with the auto-change timer.
//!
//! The timer is a single tokio task looping over an interval. Ticks are
//! serialized because one task performs them all; starting a new timer always
//! aborts the previous task first so two tickers never coexist.

use super::DesignState;
use crate::constants::AUTO_CHANGE_INTERVAL;
use crate::logger::log;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Called with the new design id after every timer-driven change
pub type DesignChangeHook = Arc<dyn Fn(u8) + Send + Sync>;

pub struct ClockController {
    state: Arc<Mutex<DesignState>>,
    runtime: Handle,
    interval: Duration,
    timer: Option<JoinHandle<()>>,
    on_change: Option<DesignChangeHook>,
}

impl ClockController {
    /// Controller with the default 10 second auto-change interval.
    pub fn new(runtime: Handle) -> Self {
        Self::with_interval(runtime, AUTO_CHANGE_INTERVAL)
    }

    pub fn with_interval(runtime: Handle, interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(DesignState::default())),
            runtime,
            interval,
            timer: None,
            on_change: None,
        }
    }

    /// Register a hook fired from the timer task after each change, e.g. to
    /// request a repaint.
    pub fn set_change_hook(&mut self, hook: DesignChangeHook) {
        self.on_change = Some(hook);
    }

    /// Snapshot of the current state
    pub fn snapshot(&self) -> DesignState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn design_id(&self) -> u8 {
        self.snapshot().design_id()
    }

    pub fn is_auto_change_enabled(&self) -> bool {
        self.snapshot().auto_change_enabled()
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.snapshot().shuffle_enabled()
    }

    /// Whether a timer task is currently alive
    pub fn is_timer_running(&self) -> bool {
        self.timer
            .as_ref()
            .map(|timer| !timer.is_finished())
            .unwrap_or(false)
    }

    /// Advance to the next design (8 wraps to 1). Returns the new id.
    pub fn cycle(&self) -> u8 {
        let design = self.with_state(|state| state.cycle());
        log::info!("Clock design changed to: {}", design);
        design
    }

    /// Select a design; ids outside 1-8 are ignored. Returns whether it applied.
    pub fn set_design(&self, design_id: u8) -> bool {
        let applied = self.with_state(|state| state.set_design(design_id));
        if applied {
            log::info!("Clock design set to: {}", design_id);
        }
        applied
    }

    /// Flip auto-change, starting or cancelling the timer. Returns the new flag.
    pub fn toggle_auto_change(&mut self) -> bool {
        let enabled = !self.is_auto_change_enabled();
        self.set_auto_change(enabled);
        enabled
    }

    /// Enable or disable auto-change. Enabling while already running keeps the
    /// existing timer.
    pub fn set_auto_change(&mut self, enabled: bool) {
        let was_enabled = self.with_state(|state| {
            let was = state.auto_change_enabled();
            state.set_auto_change(enabled);
            was
        });

        match (was_enabled, enabled) {
            (false, true) => {
                self.start_timer();
                log::info!("Auto-change enabled");
            }
            (true, false) => {
                self.stop_timer();
                log::info!("Auto-change disabled");
            }
            _ => {}
        }
    }

    /// Flip shuffle mode. The timer is left untouched. Returns the new flag.
    pub fn toggle_shuffle(&self) -> bool {
        let enabled = self.with_state(|state| state.toggle_shuffle());
        log::info!("Shuffle mode {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    pub fn set_shuffle(&self, enabled: bool) {
        self.with_state(|state| state.set_shuffle(enabled));
    }

    fn start_timer(&mut self) {
        self.stop_timer();

        let state = Arc::clone(&self.state);
        let on_change = self.on_change.clone();
        let period = self.interval;

        self.timer = Some(self.runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let design = {
                    let Ok(mut state) = state.lock() else {
                        log::error!("Clock state lock poisoned; stopping auto-change");
                        break;
                    };
                    if !state.auto_change_enabled() {
                        break;
                    }
                    state.advance(&mut rand::thread_rng())
                };

                log::debug!("Auto-change tick -> design {}", design);
                if let Some(hook) = &on_change {
                    hook(design);
                }
            }
        }));
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut DesignState) -> T) -> T {
        match self.state.lock() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Drop for ClockController {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
