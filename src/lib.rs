#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "strict", deny(warnings))]
#![allow(clippy::identity_op)]

//! # Library for MCP2515 CAN controller
//!
//! Crate currently offer the following features:
//! * CAN2.0 format support
//! * Standard and extended ID formats for CAN frames
//! * Rollover of receive buffer 0 into receive buffer 1
//! * Acceptance filter and mask configuration
//! * [embedded_can::nb::Can] implementation
//! * no_std support
//!
//! Any [embedded_hal::spi::SpiDevice] may be used as transport.
//!
//!## CAN Tx/Rx example
//!
//!```
//!use mcp2515::example::{ExampleDelay, ExampleSPIDevice};
//!use mcp2515::can::{CanError, MCP2515};
//!use mcp2515::config::Configuration;
//!use mcp2515::frame::CanFrame;
//!use embedded_can::{Frame, StandardId};
//!
//!let spi_dev = ExampleSPIDevice::default();
//!let mut delay = ExampleDelay::default();
//!
//!let mut controller = MCP2515::new(spi_dev);
//! // Reset and configure CAN controller
//!controller
//!    .initialize(&Configuration { rx_interrupts: true }, &mut delay)
//!    .unwrap();
//!
//! // Create message frame
//!let frame = CanFrame::new(StandardId::new(0x55).unwrap(), &[1, 2, 3]).unwrap();
//!
//!// Transmit CAN message, fails with CanError::TxBufferBusy if the previous message is still pending
//!controller.write(&frame).unwrap();
//!
//!// Receive CAN message
//!let mut received = CanFrame::default();
//!match controller.read(&mut received) {
//!    Ok(()) => assert_eq!(received.data(), &[1, 2, 3, 4, 5, 6, 7, 8]),
//!    Err(CanError::NoMessageAvailable) => {}
//!    Err(error) => panic!("{error:?}"),
//!}
//!```

pub mod can;
pub mod command;
pub mod config;
pub mod status;

pub mod filter;
pub mod frame;
pub mod message;
pub mod registers;

#[cfg(feature = "example")]
pub mod example;
#[cfg(test)]
pub(crate) mod mocks;
#[cfg(test)]
mod tests;
