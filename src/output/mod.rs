//! Output module
//!
//! Collaborators the controller drives: a presenter for the display and a
//! notifier for audible alerts.

pub mod notifier;
pub mod presenter;

// Re-export main types
pub use notifier::{Notifier, SilentNotifier, TerminalBell, Tone};
pub use presenter::{format_clock, progress, ring_dash_offset, Presenter, TerminalPresenter, View};
