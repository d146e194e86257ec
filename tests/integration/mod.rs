//! Integration tests for bubbleshow
//!
//! These exercise the tracer, player and renderers together, the TUI app
//! against a test backend, and the binary's plain mode.

#[path = "../common/mod.rs"]
pub mod common;

pub mod app_screens;
pub mod cli;
pub mod playback_flow;
