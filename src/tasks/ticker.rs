//! One-second tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Period of the recurring tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that advances the timer once per second.
///
/// The interval runs for the life of the process; the controller ignores
/// ticks while paused or idle. A fresh start re-aligns the interval so the
/// first second of a new phase is a full second.
pub async fn tick_task(state: Arc<AppState>) {
    info!("Starting tick task");

    let mut schedule_rx = state.schedule_tx.subscribe();
    let mut ticker = interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval completes immediately
    ticker.reset();

    loop {
        tokio::select! {
            // A fresh start must win over a tick that fell due meanwhile
            biased;

            changed = schedule_rx.changed() => {
                if changed.is_err() {
                    info!("Schedule channel closed, stopping tick task");
                    break;
                }
                debug!("Fresh start, re-aligning tick schedule");
                ticker.reset();
            }

            _ = ticker.tick() => {
                match state.tick() {
                    Ok(TickOutcome::Skipped) => {}
                    Ok(TickOutcome::Counted) => {}
                    Ok(TickOutcome::PhaseChanged(mode)) => debug!("Tick entered {:?}", mode),
                    Ok(TickOutcome::Finished) => debug!("Tick finished the run"),
                    Err(e) => error!("Failed to advance timer: {}", e),
                }
            }
        }
    }
}
