//!# CAN frame
//! Caller owned frame value, filled by [crate::can::MCP2515::read] and
//! consumed by [crate::can::MCP2515::write].
//!
//! ```
//!# use mcp2515::frame::CanFrame;
//!# use embedded_can::{Frame, Id, StandardId};
//!#
//! let frame = CanFrame::new(StandardId::new(0x123).unwrap(), &[1, 2, 3]).unwrap();
//!
//! assert!(!frame.is_extended());
//! assert_eq!(frame.data(), &[1, 2, 3]);
//! ```
use embedded_can::{Frame, Id, StandardId};

/// Maximum number of payload bytes of a CAN 2.0 frame
pub const MAX_PAYLOAD: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CanFrame {
    identifier: Id,
    rtr: bool,
    dlc: usize,
    data: [u8; MAX_PAYLOAD],
}

impl Default for CanFrame {
    fn default() -> Self {
        Self {
            identifier: Id::Standard(StandardId::ZERO),
            rtr: false,
            dlc: 0,
            data: [0; MAX_PAYLOAD],
        }
    }
}

impl CanFrame {
    /// Overwrites identifier and payload, used when draining a receive buffer.
    /// Payload is truncated to [MAX_PAYLOAD] bytes.
    pub(crate) fn load(&mut self, identifier: Id, data: &[u8]) {
        let dlc = data.len().min(MAX_PAYLOAD);

        self.identifier = identifier;
        self.rtr = false;
        self.dlc = dlc;
        self.data = [0; MAX_PAYLOAD];
        self.data[..dlc].copy_from_slice(&data[..dlc]);
    }

    /// Overwrites the frame with a remote request of the given length, clamped to [MAX_PAYLOAD]
    pub(crate) fn load_remote(&mut self, identifier: Id, dlc: usize) {
        self.identifier = identifier;
        self.rtr = true;
        self.dlc = dlc.min(MAX_PAYLOAD);
        self.data = [0; MAX_PAYLOAD];
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > MAX_PAYLOAD {
            return None;
        }

        let mut frame = CanFrame::default();
        frame.load(id.into(), data);
        Some(frame)
    }

    fn new_remote(id: impl Into<Id>, dlc: usize) -> Option<Self> {
        if dlc > MAX_PAYLOAD {
            return None;
        }

        let mut frame = CanFrame::default();
        frame.load_remote(id.into(), dlc);
        Some(frame)
    }

    fn is_extended(&self) -> bool {
        matches!(self.identifier, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        self.rtr
    }

    fn id(&self) -> Id {
        self.identifier
    }

    fn dlc(&self) -> usize {
        self.dlc
    }

    /// Remote frames carry no payload, only the requested length
    fn data(&self) -> &[u8] {
        if self.rtr {
            return &[];
        }

        &self.data[..self.dlc]
    }
}
