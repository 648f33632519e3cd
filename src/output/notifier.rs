//! Audible alerts at phase boundaries

use std::{f64::consts::PI, io::Write, time::Duration};

use tracing::debug;

/// Consumer of phase-boundary alerts.
///
/// Implementations must swallow their own failures; the timer never sees them.
pub trait Notifier: Send {
    fn alert(&mut self);
}

impl Notifier for Box<dyn Notifier> {
    fn alert(&mut self) {
        (**self).alert()
    }
}

/// Shape of the alert tone: a sine with a fast attack and exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f64,
    pub duration: Duration,
    pub attack: Duration,
    pub decay_end: Duration,
    pub peak_gain: f64,
    pub floor_gain: f64,
}

impl Tone {
    /// The short 880 Hz beep played when a phase ends
    pub const fn beep() -> Self {
        Self {
            frequency_hz: 880.0,
            duration: Duration::from_millis(700),
            attack: Duration::from_millis(10),
            decay_end: Duration::from_millis(600),
            peak_gain: 0.5,
            floor_gain: 0.001,
        }
    }

    /// Envelope gain at `t` seconds after the tone starts
    pub fn amplitude_at(&self, t: f64) -> f64 {
        let attack = self.attack.as_secs_f64();
        let decay_end = self.decay_end.as_secs_f64();

        if t < 0.0 || t >= self.duration.as_secs_f64() {
            0.0
        } else if t < attack {
            self.peak_gain * t / attack
        } else if t < decay_end {
            let ratio = (t - attack) / (decay_end - attack);
            self.peak_gain * (self.floor_gain / self.peak_gain).powf(ratio)
        } else {
            self.floor_gain
        }
    }

    /// Signal value at `t` seconds after the tone starts
    pub fn sample_at(&self, t: f64) -> f64 {
        self.amplitude_at(t) * (2.0 * PI * self.frequency_hz * t).sin()
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::beep()
    }
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default)]
pub struct TerminalBell {
    tone: Tone,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self { tone: Tone::beep() }
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }
}

impl Notifier for TerminalBell {
    fn alert(&mut self) {
        debug!("Alert: {} Hz for {:?}", self.tone.frequency_hz, self.tone.duration);
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            debug!("Could not ring terminal bell: {}", e);
        }
    }
}

/// Notifier that does nothing
#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn alert(&mut self) {
        debug!("Alert suppressed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beep_parameters() {
        let tone = Tone::beep();
        assert_eq!(tone.frequency_hz, 880.0);
        assert_eq!(tone.duration, Duration::from_millis(700));
        assert_eq!(TerminalBell::new().tone(), &tone);
    }

    #[test]
    fn envelope_attacks_then_decays() {
        let tone = Tone::beep();
        assert_eq!(tone.amplitude_at(0.0), 0.0);
        assert!((tone.amplitude_at(0.005) - 0.25).abs() < 1e-9);
        assert!((tone.amplitude_at(0.01) - 0.5).abs() < 1e-9);

        let mid = tone.amplitude_at(0.3);
        assert!(mid < 0.5 && mid > 0.001);
        assert!(tone.amplitude_at(0.4) < mid);

        assert!((tone.amplitude_at(0.65) - 0.001).abs() < 1e-12);
        assert_eq!(tone.amplitude_at(0.7), 0.0);
        assert_eq!(tone.amplitude_at(-0.1), 0.0);
    }

    #[test]
    fn samples_stay_within_envelope() {
        let tone = Tone::beep();
        for i in 0..700 {
            let t = i as f64 / 1000.0;
            assert!(tone.sample_at(t).abs() <= tone.amplitude_at(t) + 1e-12);
        }
    }

    #[test]
    fn alerts_never_panic() {
        TerminalBell::new().alert();
        SilentNotifier.alert();
        let mut boxed: Box<dyn Notifier> = Box::new(SilentNotifier);
        boxed.alert();
    }
}
