//! Phone Verify - A small HTTP server hosting a phone verification page flow
//!
//! The library validates phone numbers, drives the resend cooldown of the
//! "send code" control, checks submitted verification codes and tells the
//! browser where to navigate. Static pages are served from a document root.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod verify;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{AppError, AppResult, VerifyError};
pub use state::{AppState, FormController, SessionId};
pub use utils::signals::shutdown_signal;
pub use verify::{CodeVerifier, Destinations, StaticCodeVerifier, VerificationFlow};
