//! Utility functions module

pub mod logging;
pub mod signals;

pub use logging::init_tracing;
pub use signals::shutdown_signal;
