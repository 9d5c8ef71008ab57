#![allow(unused_braces)]
//! Register addresses and bit masks of the MCP2515.
//!
//! Values follow the MCP2515 datasheet (DS20001801), section 11 "Register map".
use modular_bitfield_msb::prelude::*;

/// Address of a single controller register
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Register(pub u8);

impl Register {
    /// Acceptance filter 0, standard identifier high
    pub const RXF0SIDH: Register = Register(0x00);
    /// Acceptance filter 1, standard identifier high
    pub const RXF1SIDH: Register = Register(0x04);
    /// Acceptance filter 2, standard identifier high
    pub const RXF2SIDH: Register = Register(0x08);
    /// Acceptance filter 3, standard identifier high
    pub const RXF3SIDH: Register = Register(0x10);
    /// Acceptance filter 4, standard identifier high
    pub const RXF4SIDH: Register = Register(0x14);
    /// Acceptance filter 5, standard identifier high
    pub const RXF5SIDH: Register = Register(0x18);

    /// Acceptance mask 0 (RXB0), standard identifier high
    pub const RXM0SIDH: Register = Register(0x20);
    pub const RXM0SIDL: Register = Register(0x21);
    pub const RXM0EID8: Register = Register(0x22);
    pub const RXM0EID0: Register = Register(0x23);
    /// Acceptance mask 1 (RXB1), standard identifier high
    pub const RXM1SIDH: Register = Register(0x24);

    pub const CNF3: Register = Register(0x28);
    pub const CNF2: Register = Register(0x29);
    pub const CNF1: Register = Register(0x2A);
    pub const CANINTE: Register = Register(0x2B);
    pub const CANINTF: Register = Register(0x2C);
    pub const EFLG: Register = Register(0x2D);
    /// CANSTAT and CANCTRL are mirrored at the end of every register row
    pub const CANSTAT: Register = Register(0x2E);
    pub const CANCTRL: Register = Register(0x2F);

    pub const TXB0CTRL: Register = Register(0x30);
    pub const TXB0SIDH: Register = Register(0x31);

    pub const RXB0CTRL: Register = Register(0x60);
    pub const RXB1CTRL: Register = Register(0x70);

    /// Returns the register `count` addresses above this one, wrapping at 0xFF
    pub(crate) const fn offset(self, count: u8) -> Register {
        Register(self.0.wrapping_add(count))
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.0
    }
}

// RXBnCTRL
pub const RXM_MASK: u8 = 0b11 << 5;
pub const RXM_ANY: u8 = 0b11 << 5;
pub const BUKT: u8 = 1 << 2;

// RXMnSIDL
pub const SID_MASK: u8 = 0b111 << 5;
pub const EID_MASK: u8 = 0b11;

// CANCTRL
pub const REQOP_MASK: u8 = 0b111 << 5;
pub const REQOP_NORMAL: u8 = 0b000 << 5;

// TXBnCTRL
pub const TXREQ: u8 = 1 << 3;

// TXBnSIDL, RXBnSIDL, RXFnSIDL
pub const EXIDE: u8 = 1 << 3;
pub const SIDL_STD_MASK: u8 = SID_MASK | EXIDE;

// CANINTE
pub const RX1IE: u8 = 1 << 1;
pub const RX0IE: u8 = 1 << 0;

// TXBnDLC, RXBnDLC
pub const RTR: u8 = 1 << 6;
pub const DLC_MASK: u8 = 0x0F;

#[bitfield]
#[derive(Default)]
#[repr(u8)]
/// Transmit buffer control register
pub struct TxbCtrl {
    #[skip]
    __: B1,
    /// Message aborted flag
    pub abtf: bool,
    /// Message lost arbitration bit
    pub mloa: bool,
    /// Transmission error detected bit
    pub txerr: bool,
    /// Message transmit request bit
    pub txreq: bool,
    #[skip]
    __: B1,
    /// Transmit buffer priority
    pub txp: B2,
}

#[bitfield]
#[derive(Default)]
#[repr(u8)]
/// CAN status register
pub struct CanStat {
    /// Operation mode bits
    pub opmod: B3,
    #[skip]
    __: B1,
    /// Interrupt flag code bits
    pub icod: B3,
    #[skip]
    __: B1,
}
