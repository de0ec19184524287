//! Dispatcher
//!
//! The tick-driven control loop and the state machine that tracks it.

mod dispatcher;
mod state;

pub use dispatcher::{Dispatcher, Outcome, OutcomeKind};
pub use state::{DispatchEvent, DispatchState};
