//! labarm Link Abstraction Layer
//!
//! This crate defines the byte-link traits that connect the arm controller
//! to its command server. The framing and message layer is transport
//! agnostic, so the same controller code runs over TCP on a host, a serial
//! line on a bench rig, or an in-memory loopback in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (labarm-daemon)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  labarm-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   TCP link    │       │ test loopback │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`link::LinkTx`], [`link::LinkRx`] - Byte stream to the command server

#![no_std]
#![deny(unsafe_code)]

pub mod link;

pub use link::{LinkConfig, LinkRx, LinkTx};
