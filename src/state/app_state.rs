//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{IntervalController, SettingsInput, SettingsUpdate, StartOutcome, TickOutcome, TimerState};
use crate::output::{Notifier, Presenter, View};

pub type Controller = IntervalController<Box<dyn Presenter>, Box<dyn Notifier>>;

/// Main application state that owns the controller and the input fields
pub struct AppState {
    /// The one controller; the mutex serialises commands and ticks
    controller: Mutex<Controller>,
    /// Raw input fields, read only when a fresh run starts
    settings_input: Mutex<SettingsInput>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
    /// Bumped whenever a fresh phase starts so the tick task re-aligns
    pub schedule_tx: watch::Sender<u64>,
    pub _schedule_rx: watch::Receiver<u64>,
}

impl AppState {
    /// Create a new AppState with an idle controller
    pub fn new(
        port: u16,
        host: String,
        settings_input: SettingsInput,
        presenter: Box<dyn Presenter>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let controller = IntervalController::new(presenter, notifier);
        let (timer_update_tx, timer_update_rx) = watch::channel(controller.snapshot());
        let (schedule_tx, schedule_rx) = watch::channel(0);

        Self {
            controller: Mutex::new(controller),
            settings_input: Mutex::new(settings_input),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            schedule_tx,
            _schedule_rx: schedule_rx,
        }
    }

    fn lock_controller(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))
    }

    /// Apply a command to the controller and publish the resulting state
    fn command<T, F>(&self, action: &str, apply: F) -> Result<(T, TimerState), String>
    where
        F: FnOnce(&mut Controller) -> T,
    {
        let mut controller = self.lock_controller()?;
        let result = apply(&mut controller);
        let snapshot = controller.snapshot();
        drop(controller); // Release the lock early

        self.record_action(action);
        self.publish(snapshot.clone());
        Ok((result, snapshot))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: TimerState) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Must be called with the controller lock held
    fn realign_schedule(&self, outcome: StartOutcome) {
        if outcome == StartOutcome::Started {
            self.schedule_tx.send_modify(|generation| *generation += 1);
        }
    }

    /// Start a fresh run or resume a paused one
    pub fn start(&self) -> Result<(StartOutcome, TimerState), String> {
        let input = self.get_settings_input()?;
        self.command("start", |c| {
            let outcome = c.start(&input);
            self.realign_schedule(outcome);
            outcome
        })
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<TimerState, String> {
        self.command("pause", |c| c.pause()).map(|(_, snapshot)| snapshot)
    }

    /// Reset to idle
    pub fn reset(&self) -> Result<TimerState, String> {
        self.command("reset", |c| c.reset()).map(|(_, snapshot)| snapshot)
    }

    /// Space-bar behaviour: pause when running, start otherwise
    pub fn toggle(&self) -> Result<(Option<StartOutcome>, TimerState), String> {
        let input = self.get_settings_input()?;
        self.command("toggle", |c| {
            let outcome = c.toggle(&input);
            if let Some(outcome) = outcome {
                self.realign_schedule(outcome);
            }
            outcome
        })
    }

    /// Advance the timer by one second; called by the tick task
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let mut controller = self.lock_controller()?;
        let outcome = controller.tick();
        if outcome == TickOutcome::Skipped {
            return Ok(outcome);
        }
        let snapshot = controller.snapshot();
        drop(controller);

        self.publish(snapshot);
        Ok(outcome)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_controller().map(|c| c.snapshot())
    }

    /// Get the timer state and the frame a presenter would draw for it
    pub fn get_display(&self) -> Result<(TimerState, View), String> {
        self.lock_controller().map(|c| (c.snapshot(), c.view()))
    }

    /// Get the raw input fields
    pub fn get_settings_input(&self) -> Result<SettingsInput, String> {
        self.settings_input.lock()
            .map(|input| input.clone())
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    /// Change the input fields; takes effect at the next fresh start
    pub fn update_settings(&self, update: SettingsUpdate) -> Result<SettingsInput, String> {
        let mut input = self.settings_input.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))?;
        input.apply(update);
        let new_input = input.clone();
        drop(input);

        info!("Settings updated: study={:?}, rest={:?}, cycles={:?}",
              new_input.study, new_input.rest, new_input.cycles);
        self.record_action("settings");
        Ok(new_input)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
