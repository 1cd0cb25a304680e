pub mod config;
pub mod core;
pub mod harness;
pub mod sim;
pub mod ui;
pub mod util;

pub use config::Config;
pub use crate::core::{record_then_replay, Prototype, RunReport};
pub use harness::{HarnessError, Mode, RunContext, Tape};
pub use sim::{InputEvent, Simulation};
pub use ui::App;
