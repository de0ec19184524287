//! Operation decoding
//!
//! Raw `(name, argument)` pairs from the command source are turned into an
//! [`Operation`] exactly once. The dispatcher matches on the result and
//! never looks at names or argument bytes again.

use core::fmt;

use heapless::String;
use labarm_protocol::text::bounded;
use labarm_protocol::{SpotArg, MAX_ARG_LEN, MAX_NAME_LEN};

use crate::error::ArgumentError;

/// Operation name that moves a sample from a spot onto the arm
pub const TAKE: &str = "take";
/// Operation name that moves the carried sample onto a spot
pub const PUT: &str = "put";
/// Operation name that resets the status
pub const REBOOT: &str = "reboot";

/// A station/spot address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    pub station: usize,
    pub spot: usize,
}

impl Target {
    pub const fn new(station: usize, spot: usize) -> Self {
        Self { station, spot }
    }
}

impl From<SpotArg> for Target {
    fn from(arg: SpotArg) -> Self {
        Self::new(arg.station as usize, arg.spot as usize)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station {}, spot {}", self.station, self.spot)
    }
}

/// Direction of a sample transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferKind {
    /// Spot to arm
    Take,
    /// Arm to spot
    Put,
}

impl TransferKind {
    /// Wire name of the operation
    pub const fn name(self) -> &'static str {
        match self {
            TransferKind::Take => TAKE,
            TransferKind::Put => PUT,
        }
    }

    /// Spot occupancy after the transfer completes
    pub const fn spot_after(self) -> bool {
        matches!(self, TransferKind::Put)
    }

    /// Carrying flag after the transfer completes
    pub const fn carrying_after(self) -> bool {
        matches!(self, TransferKind::Take)
    }
}

/// A decoded operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Move the sample at the target onto the arm
    Take(Target),
    /// Move the carried sample onto the target
    Put(Target),
    /// Reset the status
    Reboot,
    /// Name outside the known set (truncated to [`MAX_NAME_LEN`])
    Unknown(String<MAX_NAME_LEN>),
    /// Take/put whose argument did not decode
    Malformed {
        kind: TransferKind,
        error: ArgumentError,
    },
}

impl Operation {
    /// Decode a raw operation
    ///
    /// Never fails: a bad argument becomes [`Operation::Malformed`] and an
    /// unrecognized name becomes [`Operation::Unknown`]. Reboot ignores its
    /// argument whatever its size.
    pub fn decode(name: &str, arg: &[u8]) -> Self {
        let kind = match name {
            TAKE => TransferKind::Take,
            PUT => TransferKind::Put,
            REBOOT => return Operation::Reboot,
            _ => return Operation::Unknown(bounded(name)),
        };

        match decode_target(arg) {
            Ok(target) => Self::transfer(kind, target),
            Err(error) => Operation::Malformed { kind, error },
        }
    }

    /// Build a take or put
    pub const fn transfer(kind: TransferKind, target: Target) -> Self {
        match kind {
            TransferKind::Take => Operation::Take(target),
            TransferKind::Put => Operation::Put(target),
        }
    }

    /// Operation name as it appeared on the wire
    pub fn name(&self) -> &str {
        match self {
            Operation::Take(_) => TAKE,
            Operation::Put(_) => PUT,
            Operation::Reboot => REBOOT,
            Operation::Unknown(name) => name,
            Operation::Malformed { kind, .. } => kind.name(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Take(t) | Operation::Put(t) => write!(f, "{}({})", self.name(), t),
            Operation::Malformed { kind, error } => {
                write!(f, "{}(<{}>)", kind.name(), error)
            }
            _ => f.write_str(self.name()),
        }
    }
}

fn decode_target(arg: &[u8]) -> Result<Target, ArgumentError> {
    if arg.is_empty() {
        return Err(ArgumentError::Missing);
    }
    if arg.len() > MAX_ARG_LEN {
        return Err(ArgumentError::TooLong { len: arg.len() });
    }
    Ok(SpotArg::decode(arg)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(station: u32, spot: u32) -> heapless::Vec<u8, 64> {
        SpotArg::new(station, spot).encode().unwrap()
    }

    #[test]
    fn test_decode_take_and_put() {
        assert_eq!(
            Operation::decode("take", &arg(0, 1)),
            Operation::Take(Target::new(0, 1))
        );
        assert_eq!(
            Operation::decode("put", &arg(2, 0)),
            Operation::Put(Target::new(2, 0))
        );
    }

    #[test]
    fn test_decode_reboot_ignores_argument() {
        assert_eq!(Operation::decode("reboot", &[]), Operation::Reboot);
        assert_eq!(Operation::decode("reboot", &[0xFF, 0xFF]), Operation::Reboot);
    }

    #[test]
    fn test_decode_unknown() {
        let op = Operation::decode("dance", &[]);
        assert_eq!(op, Operation::Unknown(String::try_from("dance").unwrap()));
        assert_eq!(op.name(), "dance");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(matches!(Operation::decode("TAKE", &arg(0, 0)), Operation::Unknown(_)));
    }

    #[test]
    fn test_long_unknown_name_truncated() {
        let name = "n".repeat(MAX_NAME_LEN + 8);
        match Operation::decode(&name, &[]) {
            Operation::Unknown(n) => assert_eq!(n.len(), MAX_NAME_LEN),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            Operation::decode("put", &[]),
            Operation::Malformed {
                kind: TransferKind::Put,
                error: ArgumentError::Missing,
            }
        );
    }

    #[test]
    fn test_oversized_argument() {
        let mut long = arg(0, 0).to_vec();
        long.resize(MAX_ARG_LEN + 6, 0);
        assert_eq!(
            Operation::decode("take", &long),
            Operation::Malformed {
                kind: TransferKind::Take,
                error: ArgumentError::TooLong { len: 70 },
            }
        );
        assert_eq!(Operation::decode("reboot", &long), Operation::Reboot);
    }

    #[test]
    fn test_truncated_argument() {
        match Operation::decode("take", &[1]) {
            Operation::Malformed { kind, error } => {
                assert_eq!(kind, TransferKind::Take);
                assert!(matches!(error, ArgumentError::Decode(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Operation::Take(Target::new(0, 1)).to_string(),
            "take(station 0, spot 1)"
        );
        assert_eq!(Operation::Reboot.to_string(), "reboot");
    }

    #[test]
    fn test_transfer_effects() {
        assert!(!TransferKind::Take.spot_after());
        assert!(TransferKind::Take.carrying_after());
        assert!(TransferKind::Put.spot_after());
        assert!(!TransferKind::Put.carrying_after());
    }
}
