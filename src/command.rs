//!# SPI command layer
//!
//! Every MCP2515 SPI transaction is built the same way:
//!
//! `[instruction] [address, if any] [outgoing bytes] [zero padding]`
//!
//! The padding extends the transaction so the chip can clock out the expected reply.
//! Since the bus is full duplex, the reply is found at the tail of the received buffer,
//! behind the echo of the instruction (and address) bytes.
//!
//!```
//!# use mcp2515::command::RegisterBus;
//!# use mcp2515::example::ExampleSPIDevice;
//!# use mcp2515::registers::Register;
//!#
//! let mut bus = RegisterBus::new(ExampleSPIDevice::default());
//!
//! let mut canstat = [0u8; 1];
//! bus.read(Register::CANSTAT, &mut canstat).unwrap();
//!```
use crate::registers::Register;
use bytes::BufMut;
use core::fmt::Debug;
use embedded_hal::spi::SpiDevice;
use log::debug;

/// Maximum length of a single transaction in bytes
pub const TRANSACTION_SIZE: usize = 16;

/// Synchronous full-duplex byte exchange with the controller
pub trait Transport {
    type Error: Debug;

    /// Clocks out `write` while receiving into `read`.
    /// `read` is either empty (write-only transaction) or of the same length as `write`.
    fn exchange(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error>;
}

impl<D: SpiDevice<u8>> Transport for D {
    type Error = D::Error;

    fn exchange(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        if read.is_empty() {
            return self.write(write);
        }

        self.transfer(read, write)
    }
}

/// Errors of a single register transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusError<E> {
    /// Transport failed, error is passed through
    Transport(E),
    /// Transaction would exceed [TRANSACTION_SIZE], contains the required length
    FrameTooLarge(usize),
}

/// SPI instruction set
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    /// Resets internal registers and enters configuration mode
    Reset = 0xC0,
    /// Reads register(s) starting at the given address
    Read = 0x03,
    /// Reads a receive buffer starting at RXBnSIDH, buffer index in bit 2
    ReadRxBuffer = 0x90,
    /// Reads a receive buffer starting at RXBnD0, buffer index in bit 2
    ReadRxData = 0x92,
    /// Writes register(s) starting at the given address
    Write = 0x02,
    /// Loads a transmit buffer starting at TXBnSIDH, buffer index in bits 2..1
    LoadTxBuffer = 0x40,
    /// Loads a transmit buffer starting at TXBnD0, buffer index in bits 2..1
    LoadTxData = 0x41,
    /// Quick poll of receive/transmit flags
    ReadStatus = 0xA0,
    /// Quick poll of receive buffer state and message type
    RxStatus = 0xB0,
    /// Masked register write
    BitModify = 0x05,
}

/// Receive buffer index
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RxBuffer {
    Rxb0 = 0,
    Rxb1 = 1,
}

/// Transmit buffer index
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TxBuffer {
    Txb0 = 0,
    Txb1 = 1,
    Txb2 = 2,
}

impl RxBuffer {
    fn instruction(self, base: Instruction) -> u8 {
        base as u8 | ((self as u8) << 2)
    }
}

impl TxBuffer {
    fn instruction(self, base: Instruction) -> u8 {
        base as u8 | ((self as u8) << 1)
    }
}

/// Register level access to the controller
pub struct RegisterBus<T: Transport> {
    transport: T,
    tx: [u8; TRANSACTION_SIZE],
    rx: [u8; TRANSACTION_SIZE],
}

impl<T: Transport> RegisterBus<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tx: [0; TRANSACTION_SIZE],
            rx: [0; TRANSACTION_SIZE],
        }
    }

    /// Returns the underlying transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Executes a single transaction and returns the full received buffer.
    /// Returned slice is empty if no reply is expected.
    pub fn execute(
        &mut self,
        instruction: u8,
        address: Option<Register>,
        outgoing: &[u8],
        reply_length: usize,
    ) -> Result<&[u8], BusError<T::Error>> {
        let padding = reply_length.saturating_sub(outgoing.len());
        let length = 1 + address.is_some() as usize + outgoing.len() + padding;

        if length > TRANSACTION_SIZE {
            debug!("Transaction of {length} bytes exceeds buffer of {TRANSACTION_SIZE} bytes");
            return Err(BusError::FrameTooLarge(length));
        }

        let mut buffer = &mut self.tx[..length];
        buffer.put_u8(instruction);
        if let Some(register) = address {
            buffer.put_u8(register.0);
        }
        buffer.put_slice(outgoing);
        buffer.put_bytes(0, padding);

        let received = if reply_length == 0 { 0 } else { length };

        self.transport
            .exchange(&self.tx[..length], &mut self.rx[..received])
            .map_err(BusError::Transport)?;

        Ok(&self.rx[..received])
    }

    /// Resets the controller
    pub fn reset(&mut self) -> Result<(), BusError<T::Error>> {
        self.execute(Instruction::Reset as u8, None, &[], 0)?;
        Ok(())
    }

    /// Reads `buffer.len()` consecutive registers starting at `register`
    pub fn read(&mut self, register: Register, buffer: &mut [u8]) -> Result<(), BusError<T::Error>> {
        let reply = self.execute(Instruction::Read as u8, Some(register), &[], buffer.len())?;
        copy_reply(buffer, reply, 2);
        Ok(())
    }

    /// Reads a single register byte
    pub fn read_register(&mut self, register: Register) -> Result<u8, BusError<T::Error>> {
        let mut buffer = [0u8; 1];
        self.read(register, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Writes `data` to consecutive registers starting at `register`
    pub fn write(&mut self, register: Register, data: &[u8]) -> Result<(), BusError<T::Error>> {
        self.execute(Instruction::Write as u8, Some(register), data, 0)?;
        Ok(())
    }

    /// Sets the bits selected by `mask` to the corresponding bits of `data`
    pub fn bit_modify(&mut self, register: Register, mask: u8, data: u8) -> Result<(), BusError<T::Error>> {
        self.execute(Instruction::BitModify as u8, Some(register), &[mask, data], 0)?;
        Ok(())
    }

    /// Returns the raw READ STATUS byte
    pub fn read_status(&mut self) -> Result<u8, BusError<T::Error>> {
        let reply = self.execute(Instruction::ReadStatus as u8, None, &[], 1)?;
        Ok(reply[1])
    }

    /// Returns the raw RX STATUS byte
    pub fn read_rx_status(&mut self) -> Result<u8, BusError<T::Error>> {
        let reply = self.execute(Instruction::RxStatus as u8, None, &[], 1)?;
        Ok(reply[1])
    }

    /// Reads a receive buffer starting at the identifier registers.
    /// Clears the corresponding receive interrupt flag.
    pub fn read_rx_buffer(&mut self, rx_buffer: RxBuffer, buffer: &mut [u8]) -> Result<(), BusError<T::Error>> {
        let instruction = rx_buffer.instruction(Instruction::ReadRxBuffer);
        let reply = self.execute(instruction, None, &[], buffer.len())?;
        copy_reply(buffer, reply, 1);
        Ok(())
    }

    /// Reads a receive buffer starting at the first data byte.
    /// Clears the corresponding receive interrupt flag.
    pub fn read_rx_data(&mut self, rx_buffer: RxBuffer, buffer: &mut [u8]) -> Result<(), BusError<T::Error>> {
        let instruction = rx_buffer.instruction(Instruction::ReadRxData);
        let reply = self.execute(instruction, None, &[], buffer.len())?;
        copy_reply(buffer, reply, 1);
        Ok(())
    }

    /// Loads a transmit buffer starting at the identifier registers
    pub fn load_tx_buffer(&mut self, tx_buffer: TxBuffer, data: &[u8]) -> Result<(), BusError<T::Error>> {
        self.execute(tx_buffer.instruction(Instruction::LoadTxBuffer), None, data, 0)?;
        Ok(())
    }

    /// Loads a transmit buffer starting at the first data byte
    pub fn load_tx_data(&mut self, tx_buffer: TxBuffer, data: &[u8]) -> Result<(), BusError<T::Error>> {
        self.execute(tx_buffer.instruction(Instruction::LoadTxData), None, data, 0)?;
        Ok(())
    }
}

/// Copies the reply behind the echoed `skip` bytes into `buffer`
fn copy_reply(buffer: &mut [u8], reply: &[u8], skip: usize) {
    if let Some(data) = reply.get(skip..) {
        buffer.copy_from_slice(data);
    }
}
