//! Verification code service interface

use tracing::info;

use super::PhoneNumber;

/// Issues and checks verification codes.
///
/// The server calls [`CodeVerifier::issue`] once each time a resend cooldown
/// starts and [`CodeVerifier::matches`] for every non-empty submission. An SMS
/// backend plugs in here.
pub trait CodeVerifier: Send + Sync {
    /// Deliver a code to the given phone number
    fn issue(&self, phone: &PhoneNumber);

    /// Whether the submitted code is the expected one
    fn matches(&self, code: &str) -> bool;
}

/// Verifier that accepts a single configured code
#[derive(Debug, Clone)]
pub struct StaticCodeVerifier {
    expected: String,
}

impl StaticCodeVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl CodeVerifier for StaticCodeVerifier {
    fn issue(&self, phone: &PhoneNumber) {
        info!("Verification code requested for {} (static code, nothing sent)", phone);
    }

    fn matches(&self, code: &str) -> bool {
        code == self.expected
    }
}
