//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, SettingsUpdate, StartOutcome};
use super::responses::{ApiResponse, HealthResponse, SettingsResponse, StatusResponse};

fn start_message(outcome: StartOutcome) -> &'static str {
    match outcome {
        StartOutcome::AlreadyRunning => "Timer already running",
        StartOutcome::Resumed => "Timer resumed",
        StartOutcome::Started => "Study phase started",
    }
}

/// Handle POST /start - Start a fresh run or resume a paused one
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok((outcome, timer)) => {
            info!("Start endpoint called - {:?}", outcome);
            Ok(Json(ApiResponse::from_timer(start_message(outcome).to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Stop the countdown without losing time
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(timer) => {
            info!("Pause endpoint called");
            Ok(Json(ApiResponse::stopped("Timer paused".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Abandon the run and return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(timer) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::stopped("Timer reset".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Space-bar behaviour
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok((Some(outcome), timer)) => {
            info!("Toggle endpoint called - {:?}", outcome);
            Ok(Json(ApiResponse::from_timer(start_message(outcome).to_string(), timer)))
        }
        Ok((None, timer)) => {
            info!("Toggle endpoint called - paused");
            Ok(Json(ApiResponse::stopped("Timer paused".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /settings - Return the input fields and their resolved values
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.get_settings_input() {
        Ok(input) => Ok(Json(SettingsResponse::new(input))),
        Err(e) => {
            error!("Failed to get settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /settings - Change the input fields for the next fresh start
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    match state.update_settings(update) {
        Ok(input) => {
            info!("Settings endpoint called");
            Ok(Json(SettingsResponse::new(input)))
        }
        Err(e) => {
            error!("Failed to update settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the timer and its rendered display
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let (timer, view) = match state.get_display() {
        Ok(display) => display,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        clock: view.clock(),
        mode_label: view.mode_label().to_string(),
        cycle_label: view.cycle_label(),
        progress: view.progress,
        ring_dash_offset: view.ring_dash_offset(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
