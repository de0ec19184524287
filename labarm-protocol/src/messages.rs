//! Message types for the command link
//!
//! Message kinds are divided into two categories:
//! - Controller → Server: poll for work, push state, say goodbye
//! - Server → Controller: pending operation, acknowledgement, rejection

use core::str;

use heapless::{String, Vec};

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::text::{bounded, bounded_lossy, truncate};

// Message kinds: Controller → Server
pub const MSG_POLL: u8 = 0x01;
pub const MSG_STATUS: u8 = 0x02;
pub const MSG_CARRYING: u8 = 0x03;
pub const MSG_SLOTS: u8 = 0x04;
pub const MSG_BYE: u8 = 0x0F;

// Message kinds: Server → Controller
pub const MSG_IDLE: u8 = 0x20;
pub const MSG_OPERATION: u8 = 0x21;
pub const MSG_ACK: u8 = 0x22;
pub const MSG_REJECT: u8 = 0x2E;

/// Maximum operation name length carried on the wire
pub const MAX_NAME_LEN: usize = 32;

/// Largest argument an OPERATION frame can carry
///
/// Everything after the name-length byte may be argument, so the link
/// never refuses an operation for its argument size. Argument limits are
/// enforced where the argument is decoded.
pub const MAX_OPERATION_ARG_LEN: usize = MAX_PAYLOAD_SIZE - 1;

/// Maximum rejection reason length
pub const MAX_REASON_LEN: usize = 64;

/// Maximum spots reported in one SLOTS message
pub const MAX_SLOTS: usize = 64;

/// Messages from the controller to the command server
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage<'a> {
    /// Ask for the next pending operation
    Poll,
    /// Replace the arm status text
    Status(&'a str),
    /// Replace the arm carrying flag
    Carrying(bool),
    /// Replace one station's occupancy vector
    Slots { station: u8, slots: &'a [bool] },
    /// Controller is shutting down
    Bye,
}

impl ControllerMessage<'_> {
    /// Encode this message into a frame
    ///
    /// Status text longer than a frame payload is cut on a character boundary.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerMessage::Poll => Ok(Frame::empty(MSG_POLL)),
            ControllerMessage::Status(text) => {
                Frame::new(MSG_STATUS, truncate(text, MAX_PAYLOAD_SIZE).as_bytes())
            }
            ControllerMessage::Carrying(carrying) => Frame::new(MSG_CARRYING, &[*carrying as u8]),
            ControllerMessage::Slots { station, slots } => {
                if slots.len() > MAX_SLOTS {
                    return Err(FrameError::PayloadTooLarge);
                }
                let mut payload = Vec::<u8, { MAX_SLOTS + 2 }>::new();
                payload
                    .extend_from_slice(&[*station, slots.len() as u8])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                for &occupied in slots.iter() {
                    payload
                        .push(occupied as u8)
                        .map_err(|_| FrameError::PayloadTooLarge)?;
                }
                Frame::new(MSG_SLOTS, &payload)
            }
            ControllerMessage::Bye => Ok(Frame::empty(MSG_BYE)),
        }
    }
}

/// Controller message decoded on the server side
///
/// Owns its slot vector because the wire bytes are not `bool`s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerRequest<'a> {
    Poll,
    Status(&'a str),
    Carrying(bool),
    Slots {
        station: u8,
        slots: Vec<bool, MAX_SLOTS>,
    },
    Bye,
}

impl<'a> ControllerRequest<'a> {
    /// Parse a controller message from a frame
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.kind {
            MSG_POLL => Ok(ControllerRequest::Poll),
            MSG_STATUS => str::from_utf8(payload)
                .map(ControllerRequest::Status)
                .map_err(|_| FrameError::InvalidFrame),
            MSG_CARRYING => match payload {
                [0] => Ok(ControllerRequest::Carrying(false)),
                [1] => Ok(ControllerRequest::Carrying(true)),
                _ => Err(FrameError::InvalidFrame),
            },
            MSG_SLOTS => {
                let (&station, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
                let (&count, flags) = rest.split_first().ok_or(FrameError::InvalidFrame)?;
                if flags.len() != count as usize {
                    return Err(FrameError::InvalidFrame);
                }
                let mut slots = Vec::new();
                for &flag in flags {
                    let occupied = match flag {
                        0 => false,
                        1 => true,
                        _ => return Err(FrameError::InvalidFrame),
                    };
                    slots.push(occupied).map_err(|_| FrameError::PayloadTooLarge)?;
                }
                Ok(ControllerRequest::Slots { station, slots })
            }
            MSG_BYE => Ok(ControllerRequest::Bye),
            other => Err(FrameError::UnknownKind(other)),
        }
    }
}

/// Messages from the command server to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServerMessage {
    /// No operation is pending
    Idle,
    /// One pending operation
    ///
    /// Payload: `[name_len][name...][arg...]`
    Operation {
        name: String<MAX_NAME_LEN>,
        arg: Vec<u8, MAX_OPERATION_ARG_LEN>,
    },
    /// The last report was accepted
    Ack,
    /// The last request was refused
    Reject { reason: String<MAX_REASON_LEN> },
}

impl ServerMessage {
    /// Build an operation message from its parts
    ///
    /// Names longer than [`MAX_NAME_LEN`] are cut on a character boundary.
    /// Fails only if `arg` cannot fit in a frame.
    pub fn operation(name: &str, arg: &[u8]) -> Result<Self, FrameError> {
        Ok(ServerMessage::Operation {
            name: bounded(name),
            arg: Vec::from_slice(arg).map_err(|_| FrameError::PayloadTooLarge)?,
        })
    }

    /// Build a rejection message
    pub fn reject(reason: &str) -> Self {
        ServerMessage::Reject {
            reason: bounded(reason),
        }
    }

    /// Parse a server message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let payload = frame.payload.as_slice();
        match frame.kind {
            MSG_IDLE => Ok(ServerMessage::Idle),
            MSG_OPERATION => {
                let (&name_len, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
                if rest.len() < name_len as usize {
                    return Err(FrameError::InvalidFrame);
                }
                let (name, arg) = rest.split_at(name_len as usize);
                Ok(ServerMessage::Operation {
                    name: bounded_lossy(name),
                    arg: Vec::from_slice(arg).map_err(|_| FrameError::PayloadTooLarge)?,
                })
            }
            MSG_ACK => Ok(ServerMessage::Ack),
            MSG_REJECT => {
                let reason = str::from_utf8(payload).map_err(|_| FrameError::InvalidFrame)?;
                Ok(Self::reject(reason))
            }
            other => Err(FrameError::UnknownKind(other)),
        }
    }

    /// Encode this message into a frame (used by servers and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ServerMessage::Idle => Ok(Frame::empty(MSG_IDLE)),
            ServerMessage::Operation { name, arg } => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .push(name.len() as u8)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(name.as_bytes())
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(arg)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_OPERATION, &payload)
            }
            ServerMessage::Ack => Ok(Frame::empty(MSG_ACK)),
            ServerMessage::Reject { reason } => Frame::new(MSG_REJECT, reason.as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::SpotArg;

    #[test]
    fn test_poll_frame_is_empty() {
        let frame = ControllerMessage::Poll.to_frame().unwrap();
        assert_eq!(frame.kind, MSG_POLL);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_slots_frame_layout() {
        let msg = ControllerMessage::Slots {
            station: 0,
            slots: &[false, true],
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.kind, MSG_SLOTS);
        assert_eq!(frame.payload.as_slice(), &[0, 2, 0, 1]);
    }

    #[test]
    fn test_slots_request_parsed_by_server() {
        let frame = ControllerMessage::Slots {
            station: 2,
            slots: &[true],
        }
        .to_frame()
        .unwrap();

        match ControllerRequest::from_frame(&frame).unwrap() {
            ControllerRequest::Slots { station, slots } => {
                assert_eq!(station, 2);
                assert_eq!(slots.as_slice(), &[true]);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_slots_count_mismatch_rejected() {
        let frame = Frame::new(MSG_SLOTS, &[0, 3, 1]).unwrap();
        assert_eq!(ControllerRequest::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_status_text_truncated_on_char_boundary() {
        let mut long = String::<300>::new();
        long.push('x').unwrap();
        while long.len() < 260 {
            long.push('é').unwrap();
        }
        let frame = ControllerMessage::Status(&long).to_frame().unwrap();
        assert!(frame.payload.len() <= MAX_PAYLOAD_SIZE);
        assert!(str::from_utf8(&frame.payload).is_ok());
    }

    #[test]
    fn test_carrying_request_rejects_non_boolean() {
        let frame = Frame::new(MSG_CARRYING, &[2]).unwrap();
        assert_eq!(ControllerRequest::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_operation_frame_carries_name_and_arg() {
        let arg = SpotArg::new(1, 0).encode().unwrap();
        let msg = ServerMessage::operation("put", &arg).unwrap();
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload.as_slice(), &[3, b'p', b'u', b't', 1, 0]);

        let parsed = ServerMessage::from_frame(&frame).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_operation_without_arg() {
        let frame = Frame::new(MSG_OPERATION, &[6, b'r', b'e', b'b', b'o', b'o', b't']).unwrap();
        match ServerMessage::from_frame(&frame).unwrap() {
            ServerMessage::Operation { name, arg } => {
                assert_eq!(name.as_str(), "reboot");
                assert!(arg.is_empty());
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_operation_name_longer_than_payload() {
        let frame = Frame::new(MSG_OPERATION, &[9, b't', b'a']).unwrap();
        assert_eq!(ServerMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_long_operation_name_is_truncated() {
        let name = "a-really-long-operation-name-that-keeps-going";
        let msg = ServerMessage::operation(name, &[]).unwrap();
        match msg {
            ServerMessage::Operation { name: kept, .. } => {
                assert_eq!(kept.len(), MAX_NAME_LEN);
                assert!(name.starts_with(kept.as_str()));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_operation_with_oversized_arg_is_delivered() {
        let mut payload = std::vec![6];
        payload.extend_from_slice(b"reboot");
        payload.extend_from_slice(&[0u8; 70]);
        let frame = Frame::new(MSG_OPERATION, &payload).unwrap();

        match ServerMessage::from_frame(&frame).unwrap() {
            ServerMessage::Operation { name, arg } => {
                assert_eq!(name.as_str(), "reboot");
                assert_eq!(arg.len(), 70);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_operation_arg_may_fill_the_frame() {
        let arg = [0xAAu8; MAX_PAYLOAD_SIZE - 4];
        let frame = ServerMessage::operation("put", &arg)
            .unwrap()
            .to_frame()
            .unwrap();
        assert_eq!(frame.payload.len(), MAX_PAYLOAD_SIZE);
        assert!(ServerMessage::from_frame(&frame).is_ok());
    }

    #[test]
    fn test_operation_name_with_invalid_utf8_is_marked() {
        let frame = Frame::new(MSG_OPERATION, &[5, b't', b'a', b'k', b'e', 0xFF, 0, 0]).unwrap();
        match ServerMessage::from_frame(&frame).unwrap() {
            ServerMessage::Operation { name, arg } => {
                assert_eq!(name.as_str(), "take\u{FFFD}");
                assert_eq!(arg.as_slice(), &[0, 0]);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_reject_reason() {
        let frame = ServerMessage::reject("queue closed").to_frame().unwrap();
        assert_eq!(frame.kind, MSG_REJECT);
        assert_eq!(
            ServerMessage::from_frame(&frame).unwrap(),
            ServerMessage::reject("queue closed")
        );
    }

    #[test]
    fn test_unknown_server_kind() {
        let frame = Frame::empty(0x7F);
        assert_eq!(ServerMessage::from_frame(&frame), Err(FrameError::UnknownKind(0x7F)));
    }
}
