//! Framed command source
//!
//! Implements [`CommandSource`] over any byte link by exchanging one
//! controller message for exactly one server reply.

use std::io;

use labarm_core::traits::{CommandSource, RawOperation};
use labarm_hal::{LinkRx, LinkTx};
use labarm_protocol::{ControllerMessage, Frame, FrameError, FrameParser, ServerMessage};
use tracing::{debug, info, trace};

/// Buffer size for link receive
const RX_BUF_SIZE: usize = 256;

/// Transport errors; all of them are fatal to the dispatcher
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("link i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("bad frame: {0}")]
    Frame(FrameError),

    #[error("link closed by server")]
    Closed,

    #[error("unexpected reply kind 0x{0:02x}")]
    UnexpectedReply(u8),

    #[error("rejected by server: {0}")]
    Rejected(String),
}

impl From<FrameError> for LinkError {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

/// Command source speaking the framed protocol over a link
pub struct FramedSource<L> {
    link: L,
    parser: FrameParser,
    rx: [u8; RX_BUF_SIZE],
    head: usize,
    filled: usize,
}

impl<L> FramedSource<L>
where
    L: LinkTx<Error = io::Error> + LinkRx<Error = io::Error>,
{
    pub fn new(link: L) -> Self {
        Self {
            link,
            parser: FrameParser::new(),
            rx: [0; RX_BUF_SIZE],
            head: 0,
            filled: 0,
        }
    }

    /// Give back the underlying link
    pub fn into_inner(self) -> L {
        self.link
    }

    /// Send one message and wait for its reply
    fn request(&mut self, message: ControllerMessage<'_>) -> Result<(u8, ServerMessage), LinkError> {
        let bytes = message.to_frame()?.to_bytes()?;
        self.link.write_all(&bytes)?;
        self.link.flush()?;

        let frame = self.receive()?;
        trace!(kind = frame.kind, len = frame.payload.len(), "Reply received");
        match ServerMessage::from_frame(&frame)? {
            ServerMessage::Reject { reason } => Err(LinkError::Rejected(reason.as_str().into())),
            reply => Ok((frame.kind, reply)),
        }
    }

    /// Send a report and require an ACK
    fn report(&mut self, message: ControllerMessage<'_>) -> Result<(), LinkError> {
        match self.request(message)? {
            (_, ServerMessage::Ack) => Ok(()),
            (kind, _) => Err(LinkError::UnexpectedReply(kind)),
        }
    }

    fn receive(&mut self) -> Result<Frame, LinkError> {
        loop {
            while self.head < self.filled {
                let pending = &self.rx[self.head..self.filled];
                match self.parser.feed_bytes(pending) {
                    Ok((frame, used)) => {
                        self.head += used;
                        if let Some(frame) = frame {
                            return Ok(frame);
                        }
                    }
                    Err(e) => {
                        self.discard();
                        return Err(e.into());
                    }
                }
            }

            let n = self.link.read(&mut self.rx)?;
            if n == 0 {
                return Err(LinkError::Closed);
            }
            self.head = 0;
            self.filled = n;
        }
    }

    fn discard(&mut self) {
        self.parser.reset();
        self.head = 0;
        self.filled = 0;
    }
}

impl<L> CommandSource for FramedSource<L>
where
    L: LinkTx<Error = io::Error> + LinkRx<Error = io::Error>,
{
    type Error = LinkError;

    fn poll(&mut self) -> Result<Option<RawOperation>, LinkError> {
        match self.request(ControllerMessage::Poll)? {
            (_, ServerMessage::Idle) => Ok(None),
            (_, ServerMessage::Operation { name, arg }) => {
                info!(op = %name, arg_len = arg.len(), "Received operation");
                Ok(Some(RawOperation { name, arg }))
            }
            (kind, _) => Err(LinkError::UnexpectedReply(kind)),
        }
    }

    fn report_status(&mut self, status: &str) -> Result<(), LinkError> {
        debug!(status, "Reporting status");
        self.report(ControllerMessage::Status(status))
    }

    fn report_carrying(&mut self, carrying: bool) -> Result<(), LinkError> {
        debug!(carrying, "Reporting arm state");
        self.report(ControllerMessage::Carrying(carrying))
    }

    fn report_slots(&mut self, station: usize, slots: &[bool]) -> Result<(), LinkError> {
        debug!(station, ?slots, "Reporting station state");
        let station = u8::try_from(station).map_err(|_| FrameError::PayloadTooLarge)?;
        self.report(ControllerMessage::Slots { station, slots })
    }

    fn close(&mut self) -> Result<(), LinkError> {
        info!("Closing session");
        self.report(ControllerMessage::Bye)
    }
}
