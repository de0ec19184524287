//! Byte link abstractions
//!
//! Provides blocking traits for the byte stream between the controller and
//! the command server. Every exchange on the link is a request followed by
//! exactly one reply, so blocking reads bounded by a timeout are sufficient.

/// Link transmitter
pub trait LinkTx {
    /// Error type for transmit operations
    type Error;

    /// Write all of `data` to the link
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Link receiver
pub trait LinkRx {
    /// Error type for receive operations
    type Error;

    /// Read available data from the link
    ///
    /// Blocks until at least one byte is available, the peer closes the
    /// link (returns `Ok(0)`), or the configured timeout expires (error).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Maximum time to wait for a reply, in milliseconds
    pub reply_timeout_ms: u32,
    /// Maximum time to wait for the connection, in milliseconds
    pub connect_timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            reply_timeout_ms: 5000,
            connect_timeout_ms: 3000,
        }
    }
}
