//! Shared test utilities
//!
//! - A recording renderer and a helper that plays a trace to the end
//! - TUI terminal testing helpers

pub mod recorder;
pub mod terminal;
