//! # Mock dummy structure for doc examples
//!
//! This code can be removed by disabling the `example` feature
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

/// Receive buffer content returned by [ExampleSPIDevice]: standard ID 0x55 with 8 data bytes
const EXAMPLE_RX_BLOCK: [u8; 13] = [0x0A, 0xA0, 0x0, 0x0, 8, 1, 2, 3, 4, 5, 6, 7, 8];

/// Simulates a controller which always holds a message in receive buffer 0
/// and never has a pending transmission
#[derive(Default, Debug)]
pub struct ExampleSPIDevice {}

impl ExampleSPIDevice {
    fn respond(write: &[u8], read: &mut [u8]) {
        read.fill(0);

        let reply: &[u8] = match write.first() {
            // READ STATUS: RX0IF
            Some(0xA0) => &[0b0000_0001],
            // READ RX BUFFER 0
            Some(0x90) => &EXAMPLE_RX_BLOCK,
            // READ CANSTAT: configuration mode
            Some(0x03) if write.get(1) == Some(&0x2E) => &[0x0, 0b1000_0000],
            _ => &[],
        };

        // Reply starts after the instruction byte
        read.iter_mut()
            .skip(1)
            .zip(reply.iter())
            .for_each(|(dest, value)| *dest = *value);
    }
}

impl ErrorType for ExampleSPIDevice {
    type Error = Infallible;
}

impl SpiDevice<u8> for ExampleSPIDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            if let Operation::Transfer(read, write) = operation {
                Self::respond(write, read);
            }
        }

        Ok(())
    }
}

/// Delay returning immediately
#[derive(Default, Debug)]
pub struct ExampleDelay {}

impl DelayNs for ExampleDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
