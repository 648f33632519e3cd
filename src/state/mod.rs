//! State management module
//!
//! This module contains the timer state, the controller that drives it and
//! the shared application state wrapped around both.

pub mod app_state;
pub mod controller;
pub mod settings;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::{IntervalController, StartOutcome, TickOutcome};
pub use settings::{FieldValue, Settings, SettingsInput, SettingsUpdate};
pub use timer_state::{Mode, TimerState};
