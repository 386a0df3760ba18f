//! Page sessions
//!
//! Every loaded verification page gets its own session id, controller and
//! update channel, so one visitor's cooldown never disables another's button.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    controller::{FormController, SendOutcome},
    countdown::{ControlView, Tick},
};
use crate::{
    error::{AppError, AppResult},
    verify::VerificationFlow,
};

/// Opaque identifier handed to the page on load
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct PageSession {
    controller: FormController,
    control_tx: watch::Sender<ControlView>,
    last_seen: Instant,
}

impl PageSession {
    /// Publish the controller's current view. Called with the store lock held
    /// so updates reach watchers in the order they were made.
    fn publish(&self) {
        self.control_tx.send_replace(self.controller.control());
    }

    fn is_evictable(&self, idle_ttl: Duration) -> bool {
        !self.controller.is_counting()
            && self.control_tx.receiver_count() == 0
            && self.last_seen.elapsed() >= idle_ttl
    }
}

/// All live page sessions
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, PageSession>>,
    flow: Arc<VerificationFlow>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(flow: Arc<VerificationFlow>, idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            flow,
            idle_ttl,
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, HashMap<SessionId, PageSession>>> {
        self.sessions
            .lock()
            .map_err(|e| AppError::StateLock(e.to_string()))
    }

    fn with_session<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut PageSession) -> R,
    ) -> AppResult<R> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::UnknownSession(id.to_string()))?;
        session.last_seen = Instant::now();
        Ok(f(session))
    }

    /// Open a session with an idle controller
    pub fn create(&self) -> AppResult<(SessionId, ControlView)> {
        let controller = FormController::new(Arc::clone(&self.flow));
        let control = controller.control();
        let (control_tx, _) = watch::channel(control.clone());
        let id = SessionId::generate();

        self.lock()?.insert(
            id.clone(),
            PageSession {
                controller,
                control_tx,
                last_seen: Instant::now(),
            },
        );
        debug!("Opened session {}", id);
        Ok((id, control))
    }

    pub fn send_code(&self, id: &SessionId, raw_phone: &str) -> AppResult<SendOutcome> {
        let outcome = self.with_session(id, |session| {
            let outcome = session.controller.send_code(raw_phone)?;
            if outcome.started {
                session.publish();
            }
            Ok::<_, AppError>(outcome)
        })??;
        Ok(outcome)
    }

    pub fn tick(&self, id: &SessionId) -> AppResult<Tick> {
        self.with_session(id, |session| {
            let tick = session.controller.tick();
            if tick != Tick::Ignored {
                session.publish();
            }
            tick
        })
    }

    pub fn control(&self, id: &SessionId) -> AppResult<ControlView> {
        self.with_session(id, |session| session.controller.control())
    }

    pub fn subscribe(&self, id: &SessionId) -> AppResult<watch::Receiver<ControlView>> {
        self.with_session(id, |session| session.control_tx.subscribe())
    }

    /// Drop sessions that are idle, unwatched and untouched for the idle TTL.
    /// Returns how many were removed.
    pub fn evict_idle(&self) -> AppResult<usize> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_evictable(self.idle_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle sessions, {} remaining", evicted, sessions.len());
        }
        Ok(evicted)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }
}
