//! Collaborator traits
//!
//! These traits define the interface between the dispatcher and whatever
//! delivers operations, moves the arm and paces the loop.

pub mod actuator;
pub mod command_source;
pub mod tick;

pub use actuator::{ArmActuator, Motion};
pub use command_source::{CommandSource, RawOperation};
pub use tick::TickSource;
