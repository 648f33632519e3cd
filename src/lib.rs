//! Pomodoro Clock - A study/rest interval timer daemon
//!
//! This library provides the interval controller that alternates study and
//! rest phases, the collaborators it drives (presenter and notifier), and the
//! HTTP and keyboard surfaces that send it commands.

pub mod config;
pub mod state;
pub mod api;
pub mod output;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
