//! Resend cooldown tick task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::{AppState, SessionId, Tick};

/// Interval between two countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drive one session's resend cooldown once per second until it returns to idle.
///
/// Spawned once per started cooldown. The first tick fires one period after
/// the task starts.
pub async fn countdown_timer_task(state: Arc<AppState>, session: SessionId) {
    info!("Starting countdown timer task for session {}", session);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(&session) {
            Ok(Tick::Counting(remaining)) => {
                debug!("Session {} tick: {}s remaining", session, remaining);
            }
            Ok(Tick::Finished) => {
                info!("Session {} countdown finished, send control enabled", session);
                break;
            }
            Ok(Tick::Ignored) => {
                debug!("Session {} not counting, stopping timer task", session);
                break;
            }
            Err(e) => {
                warn!("Stopping countdown for session {}: {}", session, e);
                break;
            }
        }
    }
}
