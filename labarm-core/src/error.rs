//! Error taxonomy
//!
//! Everything except [`DispatchError`] is reported as arm status and the
//! loop carries on. A [`DispatchError`] stops the dispatcher.

use core::fmt;

use heapless::String;
use labarm_protocol::{MAX_ARG_LEN, MAX_NAME_LEN};

use crate::operation::{Target, TransferKind};

/// Index outside the configured inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InventoryError {
    /// No such station
    StationOutOfRange { station: usize, stations: usize },
    /// No such spot at an existing station
    SpotOutOfRange {
        station: usize,
        spot: usize,
        spots: usize,
    },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryError::StationOutOfRange { station, stations } => write!(
                f,
                "station {} out of range ({} stations)",
                station, stations
            ),
            InventoryError::SpotOutOfRange {
                station,
                spot,
                spots,
            } => write!(
                f,
                "spot {} out of range at station {} ({} spots)",
                spot, station, spots
            ),
        }
    }
}

/// Take/put argument could not be turned into a valid target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// No argument bytes at all
    Missing,
    /// More bytes than any spot argument can need
    TooLong { len: usize },
    /// Bytes did not decode as a spot argument
    Decode(postcard::Error),
    /// Decoded, but names a station or spot that does not exist
    OutOfRange(InventoryError),
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::Missing => f.write_str("missing argument"),
            ArgumentError::TooLong { len } => write!(
                f,
                "argument too long ({} bytes, max {})",
                len, MAX_ARG_LEN
            ),
            ArgumentError::Decode(e) => write!(f, "{}", e),
            ArgumentError::OutOfRange(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ArgumentError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ArgumentError::Missing => defmt::write!(f, "missing argument"),
            ArgumentError::TooLong { len } => defmt::write!(f, "argument too long: {}", len),
            ArgumentError::Decode(e) => defmt::write!(f, "decode: {}", e),
            ArgumentError::OutOfRange(e) => defmt::write!(f, "{}", e),
        }
    }
}

impl From<InventoryError> for ArgumentError {
    fn from(e: InventoryError) -> Self {
        ArgumentError::OutOfRange(e)
    }
}

impl From<postcard::Error> for ArgumentError {
    fn from(e: postcard::Error) -> Self {
        ArgumentError::Decode(e)
    }
}

/// Take/put conflicts with the current inventory or arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreconditionError {
    /// Take from an empty spot
    SpotEmpty(Target),
    /// Put onto an occupied spot
    SpotOccupied(Target),
    /// Take while the arm already holds a sample
    AlreadyCarrying,
    /// Put while the arm is empty-handed
    NotCarrying,
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::SpotEmpty(t) => write!(
                f,
                "no sample to take at station {}, spot {}",
                t.station, t.spot
            ),
            PreconditionError::SpotOccupied(t) => write!(
                f,
                "sample is present at station {}, spot {}",
                t.station, t.spot
            ),
            PreconditionError::AlreadyCarrying => f.write_str("arm already has a sample"),
            PreconditionError::NotCarrying => f.write_str("arm does not have a sample"),
        }
    }
}

/// Any non-fatal failure of a single operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Bad take/put argument
    Argument {
        kind: TransferKind,
        error: ArgumentError,
    },
    /// Conflict with the model
    Precondition(PreconditionError),
    /// Name is not take, put or reboot
    Unknown(String<MAX_NAME_LEN>),
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationError::Argument { kind, error } => write!(
                f,
                "bad argument for operation \"{}\": {}",
                kind.name(),
                error
            ),
            OperationError::Precondition(e) => write!(f, "{}", e),
            OperationError::Unknown(name) => write!(f, "unknown operation \"{}\"", name),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OperationError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OperationError::Argument { kind, error } => {
                defmt::write!(f, "bad argument for {}: {}", kind, error)
            }
            OperationError::Precondition(e) => defmt::write!(f, "{}", e),
            OperationError::Unknown(name) => {
                defmt::write!(f, "unknown operation {}", name.as_str())
            }
        }
    }
}

impl From<PreconditionError> for OperationError {
    fn from(e: PreconditionError) -> Self {
        OperationError::Precondition(e)
    }
}

/// Fatal dispatcher error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError<E> {
    /// Command source failed to poll or report
    Transport(E),
}

impl<E: fmt::Display> fmt::Display for DispatchError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_texts() {
        let t = Target::new(0, 0);
        assert_eq!(
            PreconditionError::SpotEmpty(t).to_string(),
            "no sample to take at station 0, spot 0"
        );
        assert_eq!(
            PreconditionError::SpotOccupied(Target::new(1, 0)).to_string(),
            "sample is present at station 1, spot 0"
        );
        assert_eq!(
            PreconditionError::AlreadyCarrying.to_string(),
            "arm already has a sample"
        );
        assert_eq!(
            PreconditionError::NotCarrying.to_string(),
            "arm does not have a sample"
        );
    }

    #[test]
    fn test_argument_texts() {
        let e = OperationError::Argument {
            kind: TransferKind::Take,
            error: InventoryError::StationOutOfRange {
                station: 5,
                stations: 3,
            }
            .into(),
        };
        assert_eq!(
            e.to_string(),
            "bad argument for operation \"take\": station 5 out of range (3 stations)"
        );

        let e = OperationError::Argument {
            kind: TransferKind::Put,
            error: ArgumentError::Missing,
        };
        assert_eq!(
            e.to_string(),
            "bad argument for operation \"put\": missing argument"
        );

        assert_eq!(
            ArgumentError::TooLong { len: 70 }.to_string(),
            "argument too long (70 bytes, max 64)"
        );

        let e = InventoryError::SpotOutOfRange {
            station: 1,
            spot: 4,
            spots: 1,
        };
        assert_eq!(e.to_string(), "spot 4 out of range at station 1 (1 spots)");
    }

    #[test]
    fn test_unknown_text() {
        let e = OperationError::Unknown(String::try_from("dance").unwrap());
        assert_eq!(e.to_string(), "unknown operation \"dance\"");
    }

    #[test]
    fn test_dispatch_error_text() {
        let e: DispatchError<&str> = DispatchError::Transport("link closed");
        assert_eq!(e.to_string(), "transport error: link closed");
    }
}
