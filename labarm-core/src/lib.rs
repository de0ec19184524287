//! Board-agnostic core logic for the labarm transfer arm
//!
//! This crate contains all dispatch logic that does not depend on a
//! specific transport or actuator:
//!
//! - Inventory model (stations and their spots)
//! - Arm model (carrying flag and status text)
//! - Operation decoding and the error taxonomy
//! - Dispatcher state machine and tick loop
//! - Command source, actuator and tick traits
//! - Configuration type definitions

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod arm;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inventory;
pub mod operation;
pub mod shutdown;
pub mod traits;

pub use arm::{ArmState, IDLE_STATUS};
pub use dispatch::{DispatchEvent, DispatchState, Dispatcher, Outcome, OutcomeKind};
pub use error::{ArgumentError, DispatchError, InventoryError, OperationError, PreconditionError};
pub use inventory::{Inventory, Station};
pub use operation::{Operation, Target, TransferKind};
pub use shutdown::ShutdownToken;
pub use traits::{ArmActuator, CommandSource, Motion, RawOperation, TickSource};
