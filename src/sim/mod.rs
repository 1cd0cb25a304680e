//! The toy simulation used to verify replay fidelity: a single entity whose
//! position is driven by four held-key flags.

mod input;
mod state;

pub use input::{Action, InputEvent, KeyAction};
pub use state::{KeyState, Simulation};
