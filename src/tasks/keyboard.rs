//! Keyboard command background task

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::state::AppState;

/// A command typed on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Space (or an empty line): start when stopped, pause when running
    Toggle,
    Start,
    Pause,
    Reset,
}

impl KeyCommand {
    /// Parse one input line; `None` for anything unrecognised
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return Some(KeyCommand::Toggle);
        }
        match line.trim().to_lowercase().as_str() {
            "start" | "s" => Some(KeyCommand::Start),
            "pause" | "p" => Some(KeyCommand::Pause),
            "reset" | "r" => Some(KeyCommand::Reset),
            "toggle" | "t" => Some(KeyCommand::Toggle),
            _ => None,
        }
    }

    fn apply(self, state: &AppState) -> Result<(), String> {
        match self {
            KeyCommand::Toggle => state.toggle().map(|_| ()),
            KeyCommand::Start => state.start().map(|_| ()),
            KeyCommand::Pause => state.pause().map(|_| ()),
            KeyCommand::Reset => state.reset().map(|_| ()),
        }
    }
}

/// Background task that reads commands from stdin until EOF
pub async fn keyboard_task(state: Arc<AppState>) {
    info!("Keyboard controls: <space>/<enter> toggle, s start, p pause, r reset");
    run_commands(state, BufReader::new(tokio::io::stdin())).await;
}

/// Apply every command line from `reader` to `state`
pub async fn run_commands<R>(state: Arc<AppState>, reader: R)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match KeyCommand::parse(&line) {
                Some(command) => {
                    if let Err(e) = command.apply(&state) {
                        error!("Failed to apply {:?}: {}", command, e);
                    }
                }
                None => warn!("Unknown command: {:?}", line.trim()),
            },
            Ok(None) => {
                info!("Keyboard input closed");
                break;
            }
            Err(e) => {
                error!("Failed to read keyboard input: {}", e);
                break;
            }
        }
    }
}
