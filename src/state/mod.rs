//! State management module
//!
//! This module contains the resend countdown, the per-page form controller
//! that owns it, the session store and the shared server state.

pub mod app_state;
pub mod controller;
pub mod countdown;
pub mod session;

// Re-export main types
pub use app_state::AppState;
pub use controller::{FormController, SendOutcome};
pub use countdown::{ControlView, Countdown, Phase, Tick};
pub use session::{SessionId, SessionStore};
