//!# Controller configuration
//! Runtime options applied by [crate::can::MCP2515::initialize].
//! Bit timing is fixed at compile time, the 500 kbit/s preset is used unless
//! the `kbps-1000` feature is enabled.
use serde::{Deserialize, Serialize};

/// Entire configuration currently supported
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Enable receive interrupts (RX0IE, RX1IE) for both receive buffers
    pub rx_interrupts: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self { rx_interrupts: true }
    }
}

/// Values of the bit timing registers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitTiming {
    pub cnf1: u8,
    pub cnf2: u8,
    pub cnf3: u8,
}

impl BitTiming {
    /// 500 kbit/s at 16 MHz oscillator
    pub const KBPS_500: BitTiming = BitTiming {
        cnf1: 0x00,
        cnf2: 0xB5,
        cnf3: 0x01,
    };

    /// 1 Mbit/s at 16 MHz oscillator
    pub const KBPS_1000: BitTiming = BitTiming {
        cnf1: 0x40,
        cnf2: 0x91,
        cnf3: 0x01,
    };

    /// Register values in address order, starting at CNF3
    pub(crate) fn as_registers(&self) -> [u8; 3] {
        [self.cnf3, self.cnf2, self.cnf1]
    }
}

/// Bit timing written during initialization
#[cfg(not(feature = "kbps-1000"))]
pub const BIT_TIMING: BitTiming = BitTiming::KBPS_500;

/// Bit timing written during initialization
#[cfg(feature = "kbps-1000")]
pub const BIT_TIMING: BitTiming = BitTiming::KBPS_1000;
