//! Study/rest interval controller
//!
//! Owns the [`TimerState`] and advances it once per tick. Commands and ticks
//! are expected to be serialised by the caller; the controller itself holds
//! no locks.

use tracing::{debug, info};

use super::{Mode, Settings, SettingsInput, TimerState};
use crate::output::{Notifier, Presenter, View};

/// Result of a start command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The timer was already counting down
    AlreadyRunning,
    /// A paused phase continues where it stopped
    Resumed,
    /// A new phase began and the tick schedule should be re-aligned
    Started,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or not scheduled; nothing changed
    Skipped,
    /// One second counted down within the current phase
    Counted,
    /// A phase boundary was crossed and the timer entered this mode
    PhaseChanged(Mode),
    /// The last rest phase ended and the timer is idle again
    Finished,
}

pub struct IntervalController<P, N> {
    state: TimerState,
    /// Durations resolved at the start of the current run
    settings: Settings,
    /// Whether the recurring tick is scheduled at all
    scheduled: bool,
    presenter: P,
    notifier: N,
}

impl<P: Presenter, N: Notifier> IntervalController<P, N> {
    /// Create an idle controller and draw its initial frame
    pub fn new(presenter: P, notifier: N) -> Self {
        let mut controller = Self {
            state: TimerState::new(),
            settings: Settings::default(),
            scheduled: false,
            presenter,
            notifier,
        };
        controller.render();
        controller
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn snapshot(&self) -> TimerState {
        self.state.clone()
    }

    pub fn view(&self) -> View {
        View::from_state(&self.state)
    }

    /// Settings of the current (or last) run
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Start or resume the countdown.
    ///
    /// `input` is only read when a fresh phase begins.
    pub fn start(&mut self, input: &SettingsInput) -> StartOutcome {
        if self.state.is_running {
            debug!("Start ignored, timer already running");
            return StartOutcome::AlreadyRunning;
        }

        if self.state.is_paused_mid_phase() {
            self.state.is_running = true;
            info!("Resuming {} with {}s left", self.state.mode.label(), self.state.remaining_seconds);
            return StartOutcome::Resumed;
        }

        self.settings = input.resolve();
        self.state.cycle_count = self.settings.cycle_count;
        if self.state.current_cycle == 0 {
            self.state.current_cycle = 1;
        }
        // A run left at 00:00 by a pause may sit past a shrunken cycle count
        self.state.current_cycle = self.state.current_cycle.min(self.state.cycle_count);
        self.state.enter_phase(Mode::Study, self.settings.study_seconds());
        self.state.is_running = true;
        self.scheduled = true;

        info!(
            "Starting study phase: {}min study, {}min rest, cycle {} of {}",
            self.settings.study_minutes,
            self.settings.rest_minutes,
            self.state.current_cycle,
            self.state.cycle_count
        );
        self.render();
        StartOutcome::Started
    }

    /// Stop counting down. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running {
            debug!("Pause ignored, timer not running");
            return false;
        }
        self.state.is_running = false;
        info!("Paused {} at {}s", self.state.mode.label(), self.state.remaining_seconds);
        true
    }

    /// Abandon the run and return to idle
    pub fn reset(&mut self) {
        self.scheduled = false;
        self.state.make_idle();
        info!("Timer reset");
        self.render();
    }

    /// Start when stopped, pause when running
    pub fn toggle(&mut self, input: &SettingsInput) -> Option<StartOutcome> {
        if self.state.is_running {
            self.pause();
            None
        } else {
            Some(self.start(input))
        }
    }

    /// Advance the timer by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.scheduled || !self.state.is_running {
            return TickOutcome::Skipped;
        }

        self.state.remaining_seconds -= 1;
        if self.state.remaining_seconds >= 0 {
            self.render();
            return TickOutcome::Counted;
        }

        self.notifier.alert();
        let outcome = match self.state.mode {
            Mode::Study => {
                self.state.enter_phase(Mode::Rest, self.settings.rest_seconds());
                info!("Study phase {} complete, resting", self.state.current_cycle);
                TickOutcome::PhaseChanged(Mode::Rest)
            }
            _ if self.state.current_cycle >= self.state.cycle_count => {
                self.scheduled = false;
                self.state.make_idle();
                info!("All {} cycles complete", self.state.cycle_count);
                self.render();
                return TickOutcome::Finished;
            }
            _ => {
                self.state.current_cycle += 1;
                self.state.enter_phase(Mode::Study, self.settings.study_seconds());
                info!("Starting cycle {} of {}", self.state.current_cycle, self.state.cycle_count);
                TickOutcome::PhaseChanged(Mode::Study)
            }
        };

        self.render();
        outcome
    }

    fn render(&mut self) {
        let view = View::from_state(&self.state);
        self.presenter.render(&view);
    }
}
