//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Settings, SettingsInput, TimerState};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for a timer that is counting down
    pub fn running(message: String, timer: TimerState) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create a response for a paused or idle timer
    pub fn stopped(message: String, timer: TimerState) -> Self {
        Self::new("stopped".to_string(), message, timer)
    }

    /// Pick `running` or `stopped` from the timer itself
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        if timer.is_running() {
            Self::running(message, timer)
        } else {
            Self::stopped(message, timer)
        }
    }
}

/// Raw input fields together with the values a fresh start would use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub input: SettingsInput,
    pub resolved: Settings,
}

impl SettingsResponse {
    pub fn new(input: SettingsInput) -> Self {
        let resolved = input.resolve();
        Self { input, resolved }
    }
}

/// Status response with the rendered display values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub clock: String,
    pub mode_label: String,
    pub cycle_label: String,
    pub progress: f64,
    pub ring_dash_offset: f64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
