//! Operation argument payloads
//!
//! `take` and `put` carry the target location as a postcard-encoded
//! [`SpotArg`]. The payload is opaque to the frame layer; it is decoded
//! exactly once, when the controller turns a received operation into a
//! typed command.

use heapless::Vec;
use serde::{Deserialize, Serialize};

/// Maximum argument payload length in bytes
pub const MAX_ARG_LEN: usize = 64;

/// Station/spot pair addressed by `take` and `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpotArg {
    /// Station index
    pub station: u32,
    /// Spot index within the station
    pub spot: u32,
}

impl SpotArg {
    /// Create a new argument
    pub const fn new(station: u32, spot: u32) -> Self {
        Self { station, spot }
    }

    /// Decode an argument payload
    ///
    /// Bytes after the encoded value are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }

    /// Encode this argument into a payload
    pub fn encode(&self) -> Result<Vec<u8, MAX_ARG_LEN>, postcard::Error> {
        let mut buffer = [0u8; MAX_ARG_LEN];
        let used = postcard::to_slice(self, &mut buffer)?;
        Vec::from_slice(used).map_err(|_| postcard::Error::SerializeBufferFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_indices_are_one_byte_each() {
        let bytes = SpotArg::new(2, 1).encode().unwrap();
        assert_eq!(bytes.as_slice(), &[2, 1]);
    }

    #[test]
    fn test_decode_encoded_argument() {
        let arg = SpotArg::new(300, 7);
        let bytes = arg.encode().unwrap();
        assert_eq!(SpotArg::decode(&bytes), Ok(arg));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(SpotArg::decode(&[0, 1, 0xFF]), Ok(SpotArg::new(0, 1)));
    }

    #[test]
    fn test_decode_truncated_payload() {
        assert!(SpotArg::decode(&[3]).is_err());
        assert!(SpotArg::decode(&[]).is_err());
    }
}
