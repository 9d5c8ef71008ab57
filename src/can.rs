//!# CAN Controller device
//!
//!```
//!# use mcp2515::can::MCP2515;
//!# use mcp2515::config::Configuration;
//!# use mcp2515::example::*;
//!#
//! let spi_dev = ExampleSPIDevice::default();
//! let mut delay = ExampleDelay::default();
//!
//! // Initialize controller object
//! let mut can_controller = MCP2515::new(spi_dev);
//!
//! // Use default configuration settings
//! let can_config = Configuration::default();
//!
//! // Reset and configure CAN controller
//! can_controller.initialize(&can_config, &mut delay).unwrap();
//! ```
use crate::command::{BusError, RegisterBus, RxBuffer, Transport, TxBuffer};
use crate::config::{Configuration, BIT_TIMING};
use crate::filter::{Filter, Mask};
use crate::frame::CanFrame;
use crate::message::{decode_block, encode_block, encode_id, IDENTIFIER_SIZE, MESSAGE_BLOCK_SIZE};
use crate::registers::{
    Register, TxbCtrl, BUKT, EID_MASK, REQOP_MASK, REQOP_NORMAL, RX0IE, RX1IE, RXM_MASK, SIDL_STD_MASK, SID_MASK,
    TXREQ,
};
use crate::status::{ControllerStatus, OperationMode, OperationStatus, ReceiveStatus};
use core::fmt::Debug;
use embedded_can::{ErrorKind, Id};
use embedded_hal::delay::DelayNs;
use embedded_time::duration::Milliseconds;
use embedded_time::Clock;
use log::debug;

/// Oscillator start-up time after reset
const RESET_DELAY_MS: u32 = 30;

/// Maximum time for a requested operation mode to be reached
const MODE_TIMEOUT_MS: u32 = 2;

/// Possible CAN errors during Configuration/Transmission/Reception
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CanError<E> {
    /// SPI command failed
    BusErr(BusError<E>),
    /// Internal clock error
    ClockError,
    /// Device did not enter the requested mode within timeout of 2 ms
    ModeTimeout,
    /// Neither receive buffer holds a message
    NoMessageAvailable,
    /// Status poll failed, so it is unknown whether a message is available.
    /// Only returned by [MCP2515::try_read].
    StatusUnavailable(BusError<E>),
    /// Transmission of the previous message is still pending
    TxBufferBusy,
}

impl<E> From<BusError<E>> for CanError<E> {
    fn from(value: BusError<E>) -> Self {
        CanError::BusErr(value)
    }
}

impl<E> From<embedded_time::clock::Error> for CanError<E> {
    fn from(_error: embedded_time::clock::Error) -> Self {
        CanError::ClockError
    }
}

impl<E: Debug> embedded_can::Error for CanError<E> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Tracks receive buffer 1 while buffer 0 is drained
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RxState {
    Idle,
    /// Last status poll reported both buffers full, buffer 1 is read next without polling
    PendingBuffer1,
}

/// Main MCP2515 CAN controller device
pub struct MCP2515<T: Transport> {
    /// Command layer on top of the SPI device
    bus: RegisterBus<T>,

    rx_state: RxState,
}

impl<T: Transport> MCP2515<T> {
    pub fn new(transport: T) -> Self {
        Self {
            bus: RegisterBus::new(transport),
            rx_state: RxState::Idle,
        }
    }

    /// Releases the underlying SPI device
    pub fn release(self) -> T {
        self.bus.release()
    }

    /// Reset internal register to default and switch to Configuration mode
    pub fn reset(&mut self) -> Result<(), CanError<T::Error>> {
        self.bus.reset()?;
        self.rx_state = RxState::Idle;

        Ok(())
    }

    /// Resets the controller and brings it into normal mode.
    ///
    /// Both receive buffers accept any message, RXB0 rolls over into RXB1.
    pub fn initialize<DELAY: DelayNs>(
        &mut self,
        config: &Configuration,
        delay: &mut DELAY,
    ) -> Result<(), CanError<T::Error>> {
        self.reset()?;
        delay.delay_ms(RESET_DELAY_MS);

        self.bus.write(Register::CNF3, &BIT_TIMING.as_registers())?;

        // Receive mode 0 with rollover: If RXB0 is full, next message is written to RXB1
        self.bus.bit_modify(Register::RXB0CTRL, RXM_MASK | BUKT, BUKT)?;

        // Cleared mask 0 lets any message pass
        self.bus.write(Register::RXM0SIDH, &[0])?;
        self.bus.bit_modify(Register::RXM0SIDL, SID_MASK | EID_MASK, 0)?;
        self.bus.write(Register::RXM0EID8, &[0, 0])?;

        let interrupts = if config.rx_interrupts { RX1IE | RX0IE } else { 0 };
        self.bus.bit_modify(Register::CANINTE, RX1IE | RX0IE, interrupts)?;

        self.bus.bit_modify(Register::CANCTRL, REQOP_MASK, REQOP_NORMAL)?;

        Ok(())
    }

    /// Reads the next received message into `frame`.
    ///
    /// Returns [CanError::NoMessageAvailable] if both receive buffers are empty
    /// or if the status poll fails.
    pub fn read(&mut self, frame: &mut CanFrame) -> Result<(), CanError<T::Error>> {
        match self.try_read(frame) {
            Err(CanError::StatusUnavailable(error)) => {
                debug!("Status poll failed, no message reported: {error:?}");
                Err(CanError::NoMessageAvailable)
            }
            result => result,
        }
    }

    /// Same as [Self::read], but reports a failed status poll as [CanError::StatusUnavailable]
    pub fn try_read(&mut self, frame: &mut CanFrame) -> Result<(), CanError<T::Error>> {
        if self.rx_state == RxState::PendingBuffer1 {
            self.rx_state = RxState::Idle;
            return self.read_rx(RxBuffer::Rxb1, frame);
        }

        let status = self.bus.read_status().map_err(CanError::StatusUnavailable)?;
        let status = ControllerStatus::from_register(status);

        if status.rx0_full {
            if status.rx1_full {
                self.rx_state = RxState::PendingBuffer1;
            }

            return self.read_rx(RxBuffer::Rxb0, frame);
        }

        if status.rx1_full {
            return self.read_rx(RxBuffer::Rxb1, frame);
        }

        Err(CanError::NoMessageAvailable)
    }

    /// Loads `frame` into transmit buffer 0 and requests transmission.
    ///
    /// Returns [CanError::TxBufferBusy] without blocking if the previous message is still pending.
    pub fn write(&mut self, frame: &CanFrame) -> Result<(), CanError<T::Error>> {
        let control = TxbCtrl::from(self.bus.read_register(Register::TXB0CTRL)?);

        if control.txreq() {
            debug!("Transmit buffer 0 still pending");
            return Err(CanError::TxBufferBusy);
        }

        self.bus.load_tx_buffer(TxBuffer::Txb0, &encode_block(frame))?;
        self.bus.bit_modify(Register::TXB0CTRL, TXREQ, TXREQ)?;

        Ok(())
    }

    /// Reads and returns the READ STATUS flags
    pub fn read_status(&mut self) -> Result<ControllerStatus, CanError<T::Error>> {
        let data = self.bus.read_status()?;

        Ok(ControllerStatus::from_register(data))
    }

    /// Reads and returns the RX STATUS flags
    pub fn read_rx_status(&mut self) -> Result<ReceiveStatus, CanError<T::Error>> {
        let data = self.bus.read_rx_status()?;

        Ok(ReceiveStatus::from_register(data))
    }

    /// Reads and returns the operation status
    pub fn read_operation_status(&mut self) -> Result<OperationStatus, CanError<T::Error>> {
        let data = self.bus.read_register(Register::CANSTAT)?;

        Ok(OperationStatus::from_register(data))
    }

    /// Requests the given operation mode without waiting for it
    pub fn request_mode(&mut self, mode: OperationMode) -> Result<(), CanError<T::Error>> {
        self.bus.bit_modify(Register::CANCTRL, REQOP_MASK, mode.as_reqop())?;

        Ok(())
    }

    /// Requests the given mode and waits max. 2 ms for the given mode to be reached
    pub fn set_mode<CLK: Clock>(&mut self, mode: OperationMode, clock: &CLK) -> Result<(), CanError<T::Error>> {
        self.request_mode(mode)?;

        let target = clock
            .try_now()?
            .checked_add(Milliseconds::new(MODE_TIMEOUT_MS))
            .ok_or(CanError::ClockError)?;

        loop {
            let current_mode = self.read_operation_status()?.mode;
            if current_mode == Some(mode) {
                return Ok(());
            }

            if clock.try_now()? > target {
                debug!("Device did not enter {mode:?} within timeout. Current mode: {current_mode:?}");
                return Err(CanError::ModeTimeout);
            }
        }
    }

    /// Writes the identifier of an acceptance filter, requires configuration mode
    pub fn set_filter(&mut self, filter: &Filter) -> Result<(), CanError<T::Error>> {
        self.write_identifier(filter.register(), filter.identifier)
    }

    /// Writes the identifier of an acceptance mask, requires configuration mode
    pub fn set_mask(&mut self, mask: &Mask) -> Result<(), CanError<T::Error>> {
        self.write_identifier(mask.register(), mask.identifier)
    }

    /// Writes an identifier to the SIDH, SIDL, EID8 and EID0 registers starting at `base`.
    /// Unused SIDL bits are kept.
    fn write_identifier(&mut self, base: Register, identifier: Id) -> Result<(), CanError<T::Error>> {
        let mut packed = [0u8; IDENTIFIER_SIZE];
        encode_id(&mut packed, identifier);

        let sidl_mask = match identifier {
            Id::Extended(_) => {
                self.bus.write(base.offset(2), &packed[2..])?;
                SIDL_STD_MASK | EID_MASK
            }
            Id::Standard(_) => SIDL_STD_MASK,
        };

        self.bus.write(base, &packed[..1])?;
        self.bus.bit_modify(base.offset(1), sidl_mask, packed[1])?;

        Ok(())
    }

    /// Reads the given receive buffer into `frame`
    fn read_rx(&mut self, buffer: RxBuffer, frame: &mut CanFrame) -> Result<(), CanError<T::Error>> {
        let mut block = [0u8; MESSAGE_BLOCK_SIZE];
        self.bus.read_rx_buffer(buffer, &mut block)?;

        decode_block(&block, frame);
        Ok(())
    }
}

impl<T: Transport> embedded_can::nb::Can for MCP2515<T> {
    type Frame = CanFrame;
    type Error = CanError<T::Error>;

    fn transmit(&mut self, frame: &Self::Frame) -> nb::Result<Option<Self::Frame>, Self::Error> {
        match self.write(frame) {
            Ok(()) => Ok(None),
            Err(CanError::TxBufferBusy) => Err(nb::Error::WouldBlock),
            Err(error) => Err(nb::Error::Other(error)),
        }
    }

    fn receive(&mut self) -> nb::Result<Self::Frame, Self::Error> {
        let mut frame = CanFrame::default();

        match self.read(&mut frame) {
            Ok(()) => Ok(frame),
            Err(CanError::NoMessageAvailable) => Err(nb::Error::WouldBlock),
            Err(error) => Err(nb::Error::Other(error)),
        }
    }
}
