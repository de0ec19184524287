//! Frame encoding and decoding for the command link.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): message kind
//! - PAYLOAD (0-250 bytes): kind-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use core::fmt;

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Bytes surrounding the payload (START + LENGTH + TYPE + CHECKSUM)
const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Frame structure or payload is not valid for its kind
    InvalidFrame,
    /// Message kind is not known to the receiver
    UnknownKind(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::PayloadTooLarge => write!(f, "payload exceeds {} bytes", MAX_PAYLOAD_SIZE),
            FrameError::InvalidChecksum => f.write_str("checksum mismatch"),
            FrameError::InvalidFrame => f.write_str("malformed frame"),
            FrameError::UnknownKind(kind) => write!(f, "unknown message kind 0x{:02x}", kind),
            FrameError::BufferTooSmall => f.write_str("encode buffer too small"),
        }
    }
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message kind
    pub kind: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame carrying `payload`
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Create a frame with no payload
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ kind, |acc, &byte| acc ^ byte)
    }

    /// Number of bytes this frame occupies on the wire
    pub fn wire_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Encode this frame into `buffer`
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.wire_len();
        if buffer.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let end = 3 + self.payload.len();
        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.kind;
        buffer[3..end].copy_from_slice(&self.payload);
        buffer[end] = Self::checksum(length, self.kind, &self.payload);

        Ok(len)
    }

    /// Encode this frame into a heapless Vec
    pub fn to_bytes(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Incremental frame parser
///
/// Bytes are fed one at a time; anything before a START byte is skipped so
/// the parser resynchronizes after line noise or a dropped frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    length: u8,
    kind: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Start,
    Length,
    Kind,
    Payload,
    Checksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            payload: Vec::new(),
            length: 0,
            kind: 0,
        }
    }

    /// Discard any partially parsed frame
    pub fn reset(&mut self) {
        self.state = ParseState::Start;
        self.payload.clear();
        self.length = 0;
        self.kind = 0;
    }

    /// True if the parser is between frames
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Start
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Start => {
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.length = byte;
                self.state = ParseState::Kind;
                Ok(None)
            }
            ParseState::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.state = if self.length == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Length was bounded by MAX_PAYLOAD_SIZE above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.length, self.kind, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame and the number of bytes consumed.
    /// Bytes after a complete frame are left for the next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(Option<Frame>, usize), FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.feed(byte)? {
                return Ok((Some(frame), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}
