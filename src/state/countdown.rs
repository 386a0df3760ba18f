//! Resend cooldown state machine

use serde::{Deserialize, Serialize};

/// Label of the send control before any code was requested
pub const SEND_LABEL: &str = "send code";
/// Label of the send control once a cooldown has run out
pub const RESEND_LABEL: &str = "resend";

/// Label shown while counting down
pub fn retry_label(remaining_seconds: u64) -> String {
    format!("{} seconds until retry", remaining_seconds)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Counting,
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not counting, nothing changed
    Ignored,
    /// Still counting with this many seconds left
    Counting(u64),
    /// Reached zero, control is enabled again
    Finished,
}

/// What the send control should look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlView {
    pub phase: Phase,
    pub disabled: bool,
    pub label: String,
    pub remaining_seconds: Option<u64>,
}

/// Countdown that keeps the send control disabled for a fixed number of seconds
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_seconds: u64,
    remaining_seconds: u64,
    phase: Phase,
    has_run: bool,
}

impl Countdown {
    /// Create an idle countdown that will run for `duration_seconds` once started
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: 0,
            phase: Phase::Idle,
            has_run: false,
        }
    }

    /// Idle -> Counting. Returns false and leaves the state alone when already counting.
    pub fn start(&mut self) -> bool {
        if self.is_counting() {
            return false;
        }
        self.remaining_seconds = self.duration_seconds;
        self.phase = Phase::Counting;
        self.has_run = true;
        true
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Tick {
        if !self.is_counting() {
            return Tick::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = Phase::Idle;
            Tick::Finished
        } else {
            Tick::Counting(self.remaining_seconds)
        }
    }

    pub fn is_counting(&self) -> bool {
        self.phase == Phase::Counting
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn view(&self) -> ControlView {
        match self.phase {
            Phase::Counting => ControlView {
                phase: Phase::Counting,
                disabled: true,
                label: retry_label(self.remaining_seconds),
                remaining_seconds: Some(self.remaining_seconds),
            },
            Phase::Idle => ControlView {
                phase: Phase::Idle,
                disabled: false,
                label: if self.has_run { RESEND_LABEL } else { SEND_LABEL }.to_string(),
                remaining_seconds: None,
            },
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(60)
    }
}
