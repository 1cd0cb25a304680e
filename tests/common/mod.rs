//! Shared test utilities for retrace
//!
//! - Scripted record/replay scenarios
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
