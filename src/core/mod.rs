//! The prototype being recorded and replayed, and the orchestration that runs
//! it through both phases.

pub mod demo;
pub mod prototype;
pub mod runner;

pub use prototype::Prototype;
pub use runner::{record_then_replay, RunReport, StreamSummary};
