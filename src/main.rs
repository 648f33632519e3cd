//! Pomodoro Clock - A study/rest interval timer daemon
//!
//! This is the main entry point for the pomodoro-clock application.

use std::{io::IsTerminal, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_clock::{
    config::Config,
    state::AppState,
    api::create_router,
    output::{Notifier, Presenter, SilentNotifier, TerminalBell, TerminalPresenter},
    tasks::{keyboard_task, tick_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-clock v{}", env!("CARGO_PKG_VERSION"));
    let settings = config.settings_input().resolve();
    info!("Configuration: host={}, port={}, study={}min, rest={}min, cycles={}",
          config.host, config.port, settings.study_minutes, settings.rest_minutes, settings.cycle_count);

    let presenter: Box<dyn Presenter> = if std::io::stderr().is_terminal() {
        Box::new(TerminalPresenter::new())
    } else {
        Box::new(TerminalPresenter::log_only())
    };
    let notifier: Box<dyn Notifier> = if config.no_bell {
        Box::new(SilentNotifier)
    } else {
        Box::new(TerminalBell::new())
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.settings_input(),
        presenter,
        notifier,
    ));

    // Start the tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_task(tick_state).await;
    });

    if !config.no_keyboard {
        let keyboard_state = Arc::clone(&state);
        tokio::spawn(async move {
            keyboard_task(keyboard_state).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start    - Start or resume the timer");
    info!("  POST /pause    - Pause the timer");
    info!("  POST /reset    - Reset to idle");
    info!("  POST /toggle   - Start or pause, like the space bar");
    info!("  GET  /settings - Show study/rest/cycle fields");
    info!("  PUT  /settings - Change study/rest/cycle fields");
    info!("  GET  /status   - Current phase, clock and progress");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
