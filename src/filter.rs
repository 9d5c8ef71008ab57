//!# Acceptance filters
//! The MCP2515 offers two acceptance masks and six acceptance filters.
//! Mask 0 and filters 0-1 belong to receive buffer 0, mask 1 and filters 2-5 to receive buffer 1.
//! Filters and masks can only be modified in configuration mode.
//!
//! ```
//!# use mcp2515::filter::{Filter, Mask};
//!# use embedded_can::{Id, ExtendedId, StandardId};
//!
//! // ID to match
//! let id = Id::Extended(ExtendedId::new(0xC672).unwrap());
//! // Create filter with index 2
//! let filter = Filter::new(id, 2).unwrap();
//! // Only the upper 8 bits of the standard ID need to match
//! let mask = Mask::new(Id::Standard(StandardId::new(0x7F8).unwrap()), 0).unwrap();
//!
//! assert!(Filter::new(id, 6).is_none());
//! ```
use crate::registers::Register;
use embedded_can::Id;

const FILTER_REGISTERS: [Register; 6] = [
    Register::RXF0SIDH,
    Register::RXF1SIDH,
    Register::RXF2SIDH,
    Register::RXF3SIDH,
    Register::RXF4SIDH,
    Register::RXF5SIDH,
];

const MASK_REGISTERS: [Register; 2] = [Register::RXM0SIDH, Register::RXM1SIDH];

/// Acceptance filter (RXFn)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub(crate) index: u8,
    pub(crate) identifier: Id,
}

impl Filter {
    /// Create new filter for the given index (0-5)
    pub fn new(identifier: Id, index: u8) -> Option<Self> {
        if index as usize >= FILTER_REGISTERS.len() {
            return None;
        }

        Some(Self { index, identifier })
    }

    /// Returns the SIDH register of the filter
    pub(crate) fn register(&self) -> Register {
        FILTER_REGISTERS[self.index as usize]
    }
}

/// Acceptance mask (RXMn), set bits must match the filter
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub(crate) index: u8,
    pub(crate) identifier: Id,
}

impl Mask {
    /// Create new mask for the given index (0-1)
    pub fn new(identifier: Id, index: u8) -> Option<Self> {
        if index as usize >= MASK_REGISTERS.len() {
            return None;
        }

        Some(Self { index, identifier })
    }

    /// Returns the SIDH register of the mask
    pub(crate) fn register(&self) -> Register {
        MASK_REGISTERS[self.index as usize]
    }
}
