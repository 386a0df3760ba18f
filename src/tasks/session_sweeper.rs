//! Idle session eviction task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{debug, warn};

use crate::state::AppState;

/// How often idle sessions are looked for
pub const SWEEP_PERIOD: Duration = Duration::from_secs(30);

/// Background task that drops page sessions nobody uses anymore
pub async fn session_sweeper_task(state: Arc<AppState>) {
    debug!(
        "Starting session sweeper (idle ttl {}s)",
        state.sessions.idle_ttl().as_secs()
    );

    let mut interval = interval(SWEEP_PERIOD);

    loop {
        interval.tick().await;

        if let Err(e) = state.sessions.evict_idle() {
            warn!("Failed to evict idle sessions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{Destinations, StaticCodeVerifier, VerificationFlow};

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_abandoned_sessions() {
        let state = Arc::new(AppState::new(
            8888,
            "127.0.0.1".to_string(),
            VerificationFlow::new(
                60,
                Destinations::new("/index.html", "/hello.html"),
                Arc::new(StaticCodeVerifier::new("2580")),
            ),
            Duration::from_secs(60),
        ));
        state.open_session().unwrap();
        state.open_session().unwrap();
        tokio::spawn(session_sweeper_task(Arc::clone(&state)));

        tokio::time::sleep(Duration::from_secs(45)).await;
        assert_eq!(state.sessions.len(), 2);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(state.sessions.is_empty());
    }
}
