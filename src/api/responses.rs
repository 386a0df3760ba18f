//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ControlView, SessionId};

/// Query string naming the page session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuery {
    pub session: SessionId,
}

/// Body of POST /api/send-code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub session: SessionId,
    #[serde(default)]
    pub phone: String,
}

/// Body of POST /api/verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Response for a newly opened page session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: SessionId,
    pub control: ControlView,
    pub timestamp: DateTime<Utc>,
}

impl SessionResponse {
    pub fn new(session: SessionId, control: ControlView) -> Self {
        Self {
            session,
            control,
            timestamp: Utc::now(),
        }
    }
}

/// Response for the send-code endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub status: String,
    pub started: bool,
    pub control: ControlView,
    pub timestamp: DateTime<Utc>,
}

impl SendCodeResponse {
    pub fn new(started: bool, control: ControlView) -> Self {
        Self {
            status: if started { "counting" } else { "already_counting" }.to_string(),
            started,
            control,
            timestamp: Utc::now(),
        }
    }
}

/// Response telling the browser where to go next
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    pub status: String,
    pub redirect: String,
    pub timestamp: DateTime<Utc>,
}

impl NavigationResponse {
    pub fn ok(redirect: String) -> Self {
        Self {
            status: "ok".to_string(),
            redirect,
            timestamp: Utc::now(),
        }
    }
}

/// Error body carrying the alert text for the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Server status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub active_sessions: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
