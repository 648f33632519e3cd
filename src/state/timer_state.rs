//! Timer state structure and management

use serde::{Deserialize, Serialize};

/// Current phase of the interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Idle,
    Study,
    Rest,
}

impl Mode {
    /// Label shown next to the clock
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "Ready",
            Mode::Study => "Study",
            Mode::Rest => "Rest",
        }
    }
}

/// Timer state for one run of study/rest cycles.
///
/// Only the controller mutates this; everything else sees copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub(super) mode: Mode,
    pub(super) total_seconds: i64,
    pub(super) remaining_seconds: i64,
    pub(super) is_running: bool,
    pub(super) cycle_count: u32,
    pub(super) current_cycle: u32,
}

impl TimerState {
    /// Create a new idle timer state
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            total_seconds: 0,
            remaining_seconds: 0,
            is_running: false,
            cycle_count: 1,
            current_cycle: 0,
        }
    }

    /// Return to idle, keeping the configured cycle count for display
    pub(super) fn make_idle(&mut self) {
        self.mode = Mode::Idle;
        self.is_running = false;
        self.current_cycle = 0;
        self.total_seconds = 0;
        self.remaining_seconds = 0;
    }

    /// Enter a phase with a full countdown
    pub(super) fn enter_phase(&mut self, mode: Mode, seconds: i64) {
        self.mode = mode;
        self.total_seconds = seconds;
        self.remaining_seconds = seconds;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    /// Whether a run is paused part-way through a phase
    pub fn is_paused_mid_phase(&self) -> bool {
        !self.is_running && self.mode != Mode::Idle && self.remaining_seconds > 0
    }

    /// Check the data model invariants
    pub fn invariants_hold(&self) -> bool {
        let idle = self.mode == Mode::Idle;
        let zeroed = self.total_seconds == 0 && self.remaining_seconds == 0;
        let cycle_in_range = if idle {
            self.current_cycle == 0
        } else {
            (1..=self.cycle_count).contains(&self.current_cycle)
        };

        idle == (self.current_cycle == 0)
            && idle == zeroed
            && cycle_in_range
            && (!self.is_running || !idle)
            && self.remaining_seconds >= -1
            && self.remaining_seconds <= self.total_seconds
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
