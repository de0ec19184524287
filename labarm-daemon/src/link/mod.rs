//! Link to the command server
//!
//! A TCP byte stream carrying framed request/reply messages.

pub mod source;
pub mod tcp;

pub use source::FramedSource;
pub use tcp::TcpLink;
