//! labarm Command Link Protocol
//!
//! This crate defines the byte-stream protocol between the arm controller
//! and the command server that queues operations for it. The protocol is
//! strictly request/reply: the controller sends one message and the server
//! answers with exactly one message.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The server owns the operation queue and the externally visible copies of
//! the arm and station state. The controller owns the real state and pushes
//! it upstream after every change.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod arg;
pub mod frame;
pub mod messages;
pub mod text;

pub use arg::{SpotArg, MAX_ARG_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{
    ControllerMessage, ControllerRequest, ServerMessage, MAX_NAME_LEN, MAX_OPERATION_ARG_LEN,
    MAX_REASON_LEN, MAX_SLOTS,
};
