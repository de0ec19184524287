//! Command source trait

use heapless::{String, Vec};
use labarm_protocol::text::bounded;
use labarm_protocol::{MAX_NAME_LEN, MAX_OPERATION_ARG_LEN};

/// An operation as received, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawOperation {
    /// Operation name
    pub name: String<MAX_NAME_LEN>,
    /// Opaque argument payload, as long as the link delivered it
    pub arg: Vec<u8, MAX_OPERATION_ARG_LEN>,
}

impl RawOperation {
    /// Build from borrowed parts, truncating anything oversized
    pub fn new(name: &str, arg: &[u8]) -> Self {
        let arg = &arg[..arg.len().min(MAX_OPERATION_ARG_LEN)];
        Self {
            name: bounded(name),
            arg: Vec::from_slice(arg).unwrap_or_default(),
        }
    }
}

/// Channel through which operations arrive and state is relayed
///
/// Every method may fail with a transport error; the dispatcher treats
/// any such error as fatal.
pub trait CommandSource {
    /// Transport error
    type Error;

    /// Fetch the next pending operation, if any
    fn poll(&mut self) -> Result<Option<RawOperation>, Self::Error>;

    /// Relay the arm status text
    fn report_status(&mut self, status: &str) -> Result<(), Self::Error>;

    /// Relay the arm carrying flag
    fn report_carrying(&mut self, carrying: bool) -> Result<(), Self::Error>;

    /// Relay one station's occupancy vector
    fn report_slots(&mut self, station: usize, slots: &[bool]) -> Result<(), Self::Error>;

    /// End the session
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
