//! Integration tests for retrace
//!
//! These tests drive the harness, the prototype and the binary together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod record_replay;
pub mod render_frame;
pub mod stream_properties;
