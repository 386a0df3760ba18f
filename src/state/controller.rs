//! Form interaction controller
//!
//! One controller per open verification page. It owns that page's resend
//! countdown and decides what a "send code" request does to it.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::countdown::{ControlView, Countdown, Tick};
use crate::{
    error::VerifyError,
    verify::{PhoneNumber, VerificationFlow},
};

/// Result of a "send code" action that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOutcome {
    /// False when a countdown was already running and nothing changed
    pub started: bool,
    pub control: ControlView,
}

#[derive(Debug)]
pub struct FormController {
    countdown: Countdown,
    flow: Arc<VerificationFlow>,
}

impl FormController {
    pub fn new(flow: Arc<VerificationFlow>) -> Self {
        Self {
            countdown: Countdown::new(flow.cooldown_seconds()),
            flow,
        }
    }

    /// Validate the phone number and start the cooldown.
    ///
    /// An invalid number leaves the control untouched. A valid number while a
    /// cooldown is already running is accepted but does not restart it.
    pub fn send_code(&mut self, raw_phone: &str) -> Result<SendOutcome, VerifyError> {
        let phone = PhoneNumber::parse(raw_phone)?;

        let started = self.countdown.start();
        if started {
            info!(
                "Starting {}s resend cooldown for {}",
                self.countdown.duration_seconds(),
                phone
            );
            self.flow.issue(&phone);
        } else {
            debug!("Cooldown already running, ignoring send for {}", phone);
        }

        Ok(SendOutcome {
            started,
            control: self.countdown.view(),
        })
    }

    /// Advance the cooldown by one second
    pub fn tick(&mut self) -> Tick {
        let tick = self.countdown.tick();
        if tick == Tick::Finished {
            info!("Resend cooldown finished");
        }
        tick
    }

    pub fn control(&self) -> ControlView {
        self.countdown.view()
    }

    /// Counting controllers are never evicted
    pub fn is_counting(&self) -> bool {
        self.countdown.is_counting()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        state::countdown::RESEND_LABEL,
        verify::{CodeVerifier, Destinations, StaticCodeVerifier},
    };

    #[derive(Default)]
    struct RecordingVerifier {
        issued: Mutex<Vec<String>>,
    }

    impl CodeVerifier for RecordingVerifier {
        fn issue(&self, phone: &PhoneNumber) {
            self.issued.lock().unwrap().push(phone.to_string());
        }

        fn matches(&self, code: &str) -> bool {
            code == "2580"
        }
    }

    fn flow(verifier: Arc<dyn CodeVerifier>) -> Arc<VerificationFlow> {
        Arc::new(VerificationFlow::new(
            60,
            Destinations::new("/index.html", "/hello.html"),
            verifier,
        ))
    }

    fn controller() -> FormController {
        FormController::new(flow(Arc::new(StaticCodeVerifier::new("2580"))))
    }

    #[test]
    fn invalid_phone_does_not_start_countdown() {
        let mut controller = controller();
        assert_eq!(controller.send_code("12800000000"), Err(VerifyError::InvalidPhone));
        assert!(!controller.is_counting());
        assert!(!controller.control().disabled);
    }

    #[test]
    fn valid_phone_starts_countdown() {
        let mut controller = controller();
        let outcome = controller.send_code(" 13800000000 ").unwrap();
        assert!(outcome.started);
        assert!(outcome.control.disabled);
        assert_eq!(outcome.control.label, "60 seconds until retry");
    }

    #[test]
    fn full_countdown_returns_to_resend() {
        let mut controller = controller();
        controller.send_code("13800000000").unwrap();
        for _ in 0..59 {
            controller.tick();
        }
        assert_eq!(controller.control().label, "1 seconds until retry");
        assert_eq!(controller.tick(), Tick::Finished);
        assert!(!controller.control().disabled);
        assert_eq!(controller.control().label, RESEND_LABEL);
    }

    #[test]
    fn second_send_while_counting_issues_nothing() {
        let verifier = Arc::new(RecordingVerifier::default());
        let mut controller = FormController::new(flow(verifier.clone()));
        assert!(controller.send_code("13800000000").unwrap().started);
        controller.tick();
        let again = controller.send_code("15900000000").unwrap();
        assert!(!again.started);
        assert_eq!(again.control.remaining_seconds, Some(59));
        assert_eq!(*verifier.issued.lock().unwrap(), vec!["13800000000".to_string()]);
    }

    #[test]
    fn controllers_sharing_a_flow_count_independently() {
        let shared = flow(Arc::new(StaticCodeVerifier::new("2580")));
        let mut first = FormController::new(Arc::clone(&shared));
        let mut second = FormController::new(shared);

        assert!(first.send_code("13800000000").unwrap().started);
        first.tick();
        assert!(!second.is_counting());
        assert!(second.send_code("13900000000").unwrap().started);
        assert_eq!(first.control().remaining_seconds, Some(59));
        assert_eq!(second.control().remaining_seconds, Some(60));
    }
}
