use crate::command::{BusError, RegisterBus, RxBuffer, TxBuffer, TRANSACTION_SIZE};
use crate::mocks::MockBus;
use crate::registers::Register;
use crate::tests::can::Mocks;
use core::convert::Infallible;
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

fn register_bus(mocks: Mocks) -> RegisterBus<MockBus> {
    RegisterBus::new(mocks.bus)
}

#[test]
fn test_reset() {
    let mut mocks = Mocks::default();
    mocks.expect_write(&[0xC0]);

    assert!(register_bus(mocks).reset().is_ok());
}

#[test]
fn test_read_register() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0x03, 0x30, 0x00], 2, &[0x0B]);

    assert_eq!(0x0B, register_bus(mocks).read_register(Register::TXB0CTRL).unwrap());
}

#[test]
fn test_read_multiple_registers() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0x03, 0x28, 0x0, 0x0, 0x0], 2, &[0x01, 0xB5, 0x00]);

    let mut buffer = [0u8; 3];
    register_bus(mocks).read(Register::CNF3, &mut buffer).unwrap();

    assert_eq!([0x01, 0xB5, 0x00], buffer);
}

#[test]
fn test_write() {
    let mut mocks = Mocks::default();
    mocks.expect_write(&[0x02, 0x22, 0xAB, 0xCD]);

    assert!(register_bus(mocks).write(Register::RXM0EID8, &[0xAB, 0xCD]).is_ok());
}

#[test]
fn test_bit_modify() {
    let mut mocks = Mocks::default();
    mocks.expect_write(&[0x05, 0x2F, 0xE0, 0x40]);

    assert!(register_bus(mocks).bit_modify(Register::CANCTRL, 0xE0, 0x40).is_ok());
}

#[test]
fn test_read_status() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0xA0, 0x00], 1, &[0b0000_0011]);

    assert_eq!(0b0000_0011, register_bus(mocks).read_status().unwrap());
}

#[test]
fn test_read_rx_status() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0xB0, 0x00], 1, &[0b0101_1001]);

    assert_eq!(0b0101_1001, register_bus(mocks).read_rx_status().unwrap());
}

#[test]
fn test_read_rx_buffer() {
    let block = [0x0A, 0xA0, 0x0, 0x0, 2, 0x11, 0x22, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0];

    let mut command = [0u8; 14];
    let mut mocks = Mocks::default();

    command[0] = 0x90;
    mocks.expect_read(&command, 1, &block);
    command[0] = 0x94;
    mocks.expect_read(&command, 1, &block);

    let mut bus = register_bus(mocks);
    let mut buffer = [0u8; 13];

    bus.read_rx_buffer(RxBuffer::Rxb0, &mut buffer).unwrap();
    assert_eq!(block, buffer);

    buffer = [0u8; 13];
    bus.read_rx_buffer(RxBuffer::Rxb1, &mut buffer).unwrap();
    assert_eq!(block, buffer);
}

#[test]
fn test_read_rx_data() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0x92, 0x0, 0x0], 1, &[0x11, 0x22]);
    mocks.expect_read(&[0x96, 0x0], 1, &[0x33]);

    let mut bus = register_bus(mocks);

    let mut buffer = [0u8; 2];
    bus.read_rx_data(RxBuffer::Rxb0, &mut buffer).unwrap();
    assert_eq!([0x11, 0x22], buffer);

    let mut buffer = [0u8; 1];
    bus.read_rx_data(RxBuffer::Rxb1, &mut buffer).unwrap();
    assert_eq!([0x33], buffer);
}

#[test]
fn test_load_tx_buffer() {
    let mut mocks = Mocks::default();
    mocks.expect_write(&[0x40, 0x0A, 0xA0]);
    mocks.expect_write(&[0x42, 0x0A, 0xA0]);
    mocks.expect_write(&[0x44, 0x0A, 0xA0]);

    let mut bus = register_bus(mocks);
    bus.load_tx_buffer(TxBuffer::Txb0, &[0x0A, 0xA0]).unwrap();
    bus.load_tx_buffer(TxBuffer::Txb1, &[0x0A, 0xA0]).unwrap();
    bus.load_tx_buffer(TxBuffer::Txb2, &[0x0A, 0xA0]).unwrap();
}

#[test]
fn test_load_tx_data() {
    let mut mocks = Mocks::default();
    mocks.expect_write(&[0x41, 0x1, 0x2]);
    mocks.expect_write(&[0x43, 0x1, 0x2]);
    mocks.expect_write(&[0x45, 0x1, 0x2]);

    let mut bus = register_bus(mocks);
    bus.load_tx_data(TxBuffer::Txb0, &[0x1, 0x2]).unwrap();
    bus.load_tx_data(TxBuffer::Txb1, &[0x1, 0x2]).unwrap();
    bus.load_tx_data(TxBuffer::Txb2, &[0x1, 0x2]).unwrap();
}

#[test]
fn test_execute_pads_reply_behind_outgoing() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0x03, 0x60, 0xAA, 0x0, 0x0], 2, &[0x1, 0x2, 0x3]);

    let mut bus = register_bus(mocks);
    let reply = bus.execute(0x03, Some(Register::RXB0CTRL), &[0xAA], 3).unwrap();

    assert_eq!(&[0x0u8, 0x0, 0x1, 0x2, 0x3], reply);
}

#[test]
fn test_execute_no_padding_if_outgoing_covers_reply() {
    let mut mocks = Mocks::default();
    mocks.expect_read(&[0x05, 0x1, 0x2, 0x3], 1, &[0x9, 0x8, 0x7]);

    let mut bus = register_bus(mocks);
    let reply = bus.execute(0x05, None, &[0x1, 0x2, 0x3], 2).unwrap();

    assert_eq!(&[0x0u8, 0x9, 0x8, 0x7], reply);
}

#[test]
fn test_execute_maximum_size() {
    let mut mocks = Mocks::default();
    let mut expected = vec![0x03, 0x30];
    expected.extend_from_slice(&[0u8; TRANSACTION_SIZE - 2]);
    mocks.expect_read(&expected, 2, &[0x7; TRANSACTION_SIZE - 2]);

    let mut buffer = [0u8; TRANSACTION_SIZE - 2];
    register_bus(mocks).read(Register::TXB0CTRL, &mut buffer).unwrap();

    assert_eq!([0x7; TRANSACTION_SIZE - 2], buffer);
}

#[test]
fn test_execute_frame_too_large() {
    // No transport call expected
    let mut bus = register_bus(Mocks::default());

    let mut buffer = [0u8; TRANSACTION_SIZE - 1];
    assert_eq!(
        BusError::FrameTooLarge(TRANSACTION_SIZE + 1),
        bus.read(Register::TXB0CTRL, &mut buffer).unwrap_err()
    );

    assert_eq!(
        BusError::FrameTooLarge(TRANSACTION_SIZE + 1),
        bus.write(Register::TXB0SIDH, &[0u8; TRANSACTION_SIZE - 1]).unwrap_err()
    );

    assert_eq!(
        BusError::FrameTooLarge(TRANSACTION_SIZE + 1),
        bus.load_tx_buffer(TxBuffer::Txb0, &[0u8; TRANSACTION_SIZE]).unwrap_err()
    );

    assert_eq!(
        BusError::FrameTooLarge(TRANSACTION_SIZE + 4),
        bus.execute(0x03, Some(Register::CNF3), &[0x1, 0x2], TRANSACTION_SIZE + 2)
            .unwrap_err()
    );
}

#[test]
fn test_transport_error() {
    let mut mocks = Mocks::default();
    mocks.expect_fault(&[0xA0, 0x0]);
    mocks.expect_fault(&[0xC0]);

    let mut bus = register_bus(mocks);
    assert_eq!(BusError::Transport(55), bus.read_status().unwrap_err());
    assert_eq!(BusError::Transport(55), bus.reset().unwrap_err());
}

/// Records which SPI operations are issued
#[derive(Default)]
struct RecordingDevice {
    writes: Vec<Vec<u8>>,
    transfers: Vec<Vec<u8>>,
}

impl ErrorType for RecordingDevice {
    type Error = Infallible;
}

impl SpiDevice<u8> for RecordingDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(data) => self.writes.push(data.to_vec()),
                Operation::Transfer(read, write) => {
                    self.transfers.push(write.to_vec());
                    read.fill(0x5A);
                }
                _ => panic!("Unexpected SPI operation"),
            }
        }

        Ok(())
    }
}

#[test]
fn test_spi_device_transport() {
    let mut bus = RegisterBus::new(RecordingDevice::default());

    bus.bit_modify(Register::TXB0CTRL, 0x08, 0x08).unwrap();
    assert_eq!(0x5A, bus.read_register(Register::CANSTAT).unwrap());

    let device = bus.release();
    assert_eq!(vec![vec![0x05, 0x30, 0x08, 0x08]], device.writes);
    assert_eq!(vec![vec![0x03, 0x2E, 0x0]], device.transfers);
}
