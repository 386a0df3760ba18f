//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::{
    controller::SendOutcome,
    countdown::{ControlView, Tick},
    session::{SessionId, SessionStore},
};
use crate::{
    error::AppResult,
    verify::{Navigation, VerificationFlow},
};

/// Shared server state: page sessions plus the verification policy
#[derive(Debug)]
pub struct AppState {
    /// One controller per open page
    pub sessions: SessionStore,
    /// Destinations and code verifier
    pub flow: Arc<VerificationFlow>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with no sessions
    pub fn new(port: u16, host: String, flow: VerificationFlow, session_ttl: Duration) -> Self {
        let flow = Arc::new(flow);

        Self {
            sessions: SessionStore::new(Arc::clone(&flow), session_ttl),
            flow,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Open a session for a freshly loaded page
    pub fn open_session(&self) -> AppResult<(SessionId, ControlView)> {
        let opened = self.sessions.create()?;
        self.record_action("session");
        Ok(opened)
    }

    /// Validate the phone number and start the session's resend cooldown
    pub fn send_code(&self, session: &SessionId, raw_phone: &str) -> AppResult<SendOutcome> {
        let outcome = self.sessions.send_code(session, raw_phone);
        self.record_action("send-code");
        outcome
    }

    /// Advance a session's cooldown by one second and notify its watchers
    pub fn tick(&self, session: &SessionId) -> AppResult<Tick> {
        self.sessions.tick(session)
    }

    /// Check a submitted verification code
    pub fn submit_code(&self, code: Option<&str>) -> AppResult<Navigation> {
        let result = self.flow.submit(code);
        self.record_action("verify");
        Ok(result?)
    }

    /// Destination of "return to home"
    pub fn go_home(&self) -> Navigation {
        self.record_action("home");
        self.flow.go_home()
    }

    /// Get a session's current send control state
    pub fn control(&self, session: &SessionId) -> AppResult<ControlView> {
        self.sessions.control(session)
    }

    /// Watch a session's send control updates
    pub fn subscribe(&self, session: &SessionId) -> AppResult<watch::Receiver<ControlView>> {
        self.sessions.subscribe(session)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{Destinations, StaticCodeVerifier};

    fn state() -> AppState {
        AppState::new(
            8888,
            "127.0.0.1".to_string(),
            VerificationFlow::new(
                3,
                Destinations::new("/index.html", "/hello.html"),
                Arc::new(StaticCodeVerifier::new("2580")),
            ),
            Duration::from_secs(600),
        )
    }

    #[test]
    fn send_code_records_last_action() {
        let state = state();
        let (session, control) = state.open_session().unwrap();
        assert!(!control.disabled);

        state.send_code(&session, "13800000000").unwrap();
        assert_eq!(state.control(&session).unwrap().label, "3 seconds until retry");
        assert_eq!(state.get_last_action().0.as_deref(), Some("send-code"));
    }

    #[test]
    fn submit_needs_no_session() {
        let state = state();
        assert!(state.submit_code(Some("0000")).is_err());
        assert_eq!(state.get_last_action().0.as_deref(), Some("verify"));
        assert_eq!(state.submit_code(Some("2580")).unwrap().redirect, "/index.html");
        assert_eq!(state.go_home().redirect, "/hello.html");
    }

    #[test]
    fn uptime_is_formatted_in_seconds_at_start() {
        assert!(state().get_uptime().ends_with('s'));
    }
}
