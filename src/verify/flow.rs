//! Verification policy shared by every page session

use std::{fmt, sync::Arc};

use tracing::info;

use super::{CodeVerifier, Destinations, Navigation, PhoneNumber};
use crate::error::VerifyError;

/// Cooldown length, destinations and code verifier for the whole server
pub struct VerificationFlow {
    cooldown_seconds: u64,
    destinations: Destinations,
    verifier: Arc<dyn CodeVerifier>,
}

impl VerificationFlow {
    pub fn new(
        cooldown_seconds: u64,
        destinations: Destinations,
        verifier: Arc<dyn CodeVerifier>,
    ) -> Self {
        Self {
            cooldown_seconds,
            destinations,
            verifier,
        }
    }

    pub fn cooldown_seconds(&self) -> u64 {
        self.cooldown_seconds
    }

    /// Ask the verifier to deliver a code
    pub fn issue(&self, phone: &PhoneNumber) {
        self.verifier.issue(phone);
    }

    /// Check a submitted verification code
    pub fn submit(&self, code: Option<&str>) -> Result<Navigation, VerifyError> {
        match code {
            None | Some("") => Err(VerifyError::EmptyCode),
            Some(code) if self.verifier.matches(code) => {
                info!("Verification code accepted");
                Ok(Navigation::to(self.destinations.success()))
            }
            Some(_) => Err(VerifyError::IncorrectCode),
        }
    }

    /// "Return to home"
    pub fn go_home(&self) -> Navigation {
        Navigation::to(self.destinations.home())
    }
}

impl fmt::Debug for VerificationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationFlow")
            .field("cooldown_seconds", &self.cooldown_seconds)
            .field("destinations", &self.destinations)
            .finish_non_exhaustive()
    }
}
