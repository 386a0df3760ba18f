//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_timer;
pub mod session_sweeper;

// Re-export main functions
pub use countdown_timer::{countdown_timer_task, TICK_PERIOD};
pub use session_sweeper::{session_sweeper_task, SWEEP_PERIOD};
