//! Rendering of the timer state

use std::{f64::consts::PI, io::Write};

use serde::Serialize;
use tracing::{debug, info};

use crate::state::{Mode, TimerState};

/// Radius of the progress ring, in the same units as the dash offset
pub const RING_RADIUS: f64 = 100.0;

/// Width of the text progress bar drawn by [`TerminalPresenter`]
const BAR_WIDTH: usize = 20;

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub mode: Mode,
    pub current_cycle: u32,
    pub cycle_count: u32,
    pub progress: f64,
}

impl View {
    pub fn from_state(state: &TimerState) -> Self {
        Self {
            total_seconds: state.total_seconds(),
            remaining_seconds: state.remaining_seconds(),
            mode: state.mode(),
            current_cycle: state.current_cycle(),
            cycle_count: state.cycle_count(),
            progress: progress(state.total_seconds(), state.remaining_seconds()),
        }
    }

    /// Remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// `Cycle n / m` while a run is active, empty when idle
    pub fn cycle_label(&self) -> String {
        if self.mode == Mode::Idle {
            String::new()
        } else {
            format!("Cycle {} / {}", self.current_cycle, self.cycle_count)
        }
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn ring_dash_offset(&self) -> f64 {
        ring_dash_offset(self.total_seconds, self.remaining_seconds)
    }
}

/// Consumer of timer updates
pub trait Presenter: Send {
    fn render(&mut self, view: &View);
}

impl Presenter for Box<dyn Presenter> {
    fn render(&mut self, view: &View) {
        (**self).render(view)
    }
}

/// Format seconds as zero-padded `MM:SS`; minutes are not wrapped at 60.
///
/// Negative input renders as `00:00`.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fraction of the phase already elapsed, in `[0, 1]`
pub fn progress(total_seconds: i64, remaining_seconds: i64) -> f64 {
    if total_seconds <= 0 {
        return 0.0;
    }
    let elapsed = (total_seconds - remaining_seconds) as f64 / total_seconds as f64;
    elapsed.clamp(0.0, 1.0)
}

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Stroke dash offset for a ring that empties as the phase elapses.
///
/// A whole circumference at the start of a phase, zero at its end. With no
/// phase at all the ring is drawn full (offset zero).
pub fn ring_dash_offset(total_seconds: i64, remaining_seconds: i64) -> f64 {
    if total_seconds <= 0 {
        return 0.0;
    }
    ring_circumference() * (1.0 - progress(total_seconds, remaining_seconds))
}

/// Presenter that logs transitions and redraws a status line on stderr
pub struct TerminalPresenter {
    last: Option<(Mode, u32)>,
    draw: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { last: None, draw: true }
    }

    /// Presenter that only logs, for when stderr is not a terminal
    pub fn log_only() -> Self {
        Self { last: None, draw: false }
    }

    fn status_line(view: &View) -> String {
        let filled = ((view.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar: String = "#".repeat(filled) + &"-".repeat(BAR_WIDTH - filled);
        let cycle = view.cycle_label();
        if cycle.is_empty() {
            format!("{:<5} {} [{}]", view.mode_label(), view.clock(), bar)
        } else {
            format!("{:<5} {} [{}] {}", view.mode_label(), view.clock(), bar, cycle)
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, view: &View) {
        let key = (view.mode, view.current_cycle);
        if self.last != Some(key) {
            match view.mode {
                Mode::Idle => info!("Timer ready"),
                _ => info!("{} - {} ({})", view.mode_label(), view.cycle_label(), view.clock()),
            }
            self.last = Some(key);
        }
        debug!("Tick: {} {} progress={:.3}", view.mode_label(), view.clock(), view.progress);

        if self.draw {
            let mut stderr = std::io::stderr().lock();
            // A closed stderr must not disturb the timer
            let _ = write!(stderr, "\r\x1b[2K{}", Self::status_line(view));
            let _ = stderr.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(mode: Mode, remaining: i64, total: i64, cycle: u32, cycles: u32) -> View {
        View {
            total_seconds: total,
            remaining_seconds: remaining,
            mode,
            current_cycle: cycle,
            cycle_count: cycles,
            progress: progress(total, remaining),
        }
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6000), "100:00");
        assert_eq!(format_clock(-1), "00:00");
    }

    #[test]
    fn progress_fraction() {
        assert_eq!(progress(0, 0), 0.0);
        assert_eq!(progress(60, 60), 0.0);
        assert_eq!(progress(60, 30), 0.5);
        assert_eq!(progress(60, 0), 1.0);
        assert_eq!(progress(60, -1), 1.0);
    }

    #[test]
    fn ring_offset_follows_progress() {
        assert_eq!(ring_dash_offset(0, 0), 0.0);
        assert!((ring_dash_offset(60, 60) - ring_circumference()).abs() < 1e-9);
        assert!((ring_dash_offset(60, 30) - PI * RING_RADIUS).abs() < 1e-9);
        assert!(ring_dash_offset(60, 0).abs() < 1e-9);
    }

    #[test]
    fn fresh_phase_shows_full_offset_then_shrinks() {
        let fresh = view(Mode::Study, 60, 60, 1, 1);
        assert!((fresh.ring_dash_offset() - 2.0 * PI * RING_RADIUS).abs() < 1e-9);

        let one_tick = view(Mode::Study, 59, 60, 1, 1);
        let expected = ring_circumference() * 59.0 / 60.0;
        assert!((one_tick.ring_dash_offset() - expected).abs() < 1e-9);
        assert!(one_tick.ring_dash_offset() < fresh.ring_dash_offset());

        assert_eq!(view(Mode::Idle, 0, 0, 0, 1).ring_dash_offset(), 0.0);
    }

    #[test]
    fn labels_depend_on_mode() {
        let idle = view(Mode::Idle, 0, 0, 0, 4);
        assert_eq!(idle.cycle_label(), "");
        assert_eq!(idle.mode_label(), "Ready");

        let study = view(Mode::Study, 1500, 1500, 2, 4);
        assert_eq!(study.cycle_label(), "Cycle 2 / 4");
        assert_eq!(study.mode_label(), "Study");
        assert_eq!(study.clock(), "25:00");
    }

    #[test]
    fn status_line_has_bar_and_cycle() {
        let line = TerminalPresenter::status_line(&view(Mode::Rest, 30, 60, 1, 2));
        assert_eq!(line, "Rest  00:30 [##########----------] Cycle 1 / 2");

        let idle = TerminalPresenter::status_line(&view(Mode::Idle, 0, 0, 0, 1));
        assert_eq!(idle, "Ready 00:00 [--------------------]");
    }
}
