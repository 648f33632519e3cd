//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::SettingsInput;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-clock")]
#[command(about = "A study/rest interval timer with HTTP and keyboard controls")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Study phase length in minutes
    #[arg(short, long, default_value = "25", allow_hyphen_values = true)]
    pub study: String,

    /// Rest phase length in minutes
    #[arg(short, long, default_value = "5", allow_hyphen_values = true)]
    pub rest: String,

    /// Number of study/rest cycles per run
    #[arg(short, long, default_value = "4", allow_hyphen_values = true)]
    pub cycles: String,

    /// Do not ring the terminal bell at phase boundaries
    #[arg(long)]
    pub no_bell: bool,

    /// Do not read start/pause/reset commands from stdin
    #[arg(long)]
    pub no_keyboard: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial values of the three input fields
    pub fn settings_input(&self) -> SettingsInput {
        SettingsInput::new(&self.study, &self.rest, &self.cycles)
    }
}
