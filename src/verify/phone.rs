//! Phone number validation

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::VerifyError;

/// Mainland mobile number: `1`, then 3-8, then nine more digits.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-8][0-9]{9}$").expect("phone pattern is valid"));

/// A phone number that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Trim the raw input once and validate it against the mobile pattern
    pub fn parse(raw: &str) -> Result<Self, VerifyError> {
        let phone = raw.trim();
        if PHONE_REGEX.is_match(phone) {
            Ok(Self(phone.to_string()))
        } else {
            Err(VerifyError::InvalidPhone)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_allowed_second_digit() {
        for second in '3'..='8' {
            let raw = format!("1{second}012345678");
            assert!(PhoneNumber::parse(&raw).is_ok(), "{raw} should be valid");
        }
        assert_eq!(PhoneNumber::parse("13800000000").unwrap().as_str(), "13800000000");
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        for raw in [
            "12800000000",
            "19800000000",
            "23800000000",
            "1380000000",
            "138000000000",
            "",
            "1380000000a",
            "+8613800000000",
            "138 0000 0000",
        ] {
            assert_eq!(PhoneNumber::parse(raw), Err(VerifyError::InvalidPhone), "{raw:?}");
        }
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        assert!(PhoneNumber::parse("13८00000000").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let phone = PhoneNumber::parse("  13912345678\n").unwrap();
        assert_eq!(phone.to_string(), "13912345678");
    }
}
