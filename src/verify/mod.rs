//! Verification building blocks
//!
//! Phone number validation, verification code checking and the navigation
//! targets the browser is sent to.

pub mod code;
pub mod flow;
pub mod navigation;
pub mod phone;

// Re-export main types
pub use code::{CodeVerifier, StaticCodeVerifier};
pub use flow::VerificationFlow;
pub use navigation::{Destinations, Navigation};
pub use phone::PhoneNumber;
