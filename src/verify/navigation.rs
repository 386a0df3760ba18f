//! Navigation destinations

use serde::{Deserialize, Serialize};

/// The two pages the flow can send the browser to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    success: String,
    home: String,
}

impl Destinations {
    pub fn new(success: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            home: home.into(),
        }
    }

    /// Page shown after a correct verification code
    pub fn success(&self) -> &str {
        &self.success
    }

    /// Page behind "return to home"
    pub fn home(&self) -> &str {
        &self.home
    }
}

/// Instruction for the browser to load another page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub redirect: String,
}

impl Navigation {
    pub fn to(target: &str) -> Self {
        Self {
            redirect: target.to_string(),
        }
    }
}
