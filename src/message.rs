//!# Message buffer codec
//! Receive and transmit buffers share the same 13 byte layout,
//! starting at the SIDH register of the buffer:
//!
//! | Byte | Register | Content                                   |
//! |------|----------|-------------------------------------------|
//! | 0    | SIDH     | SID10..SID3                               |
//! | 1    | SIDL     | SID2..SID0, -, EXIDE, -, EID17..EID16     |
//! | 2    | EID8     | EID15..EID8                               |
//! | 3    | EID0     | EID7..EID0                                |
//! | 4    | DLC      | -, RTR, -, -, DLC3..DLC0                  |
//! | 5-12 | D0..D7   | Payload                                   |
//!
//! For extended frames the 11 SID bits are the most significant bits of the 29 bit identifier.
//!
//! ```
//!# use mcp2515::message::{decode_identifier, encode_identifier};
//!#
//! let mut buffer = [0u8; 4];
//! encode_identifier(&mut buffer, 0x6A5, false);
//!
//! assert_eq!([0xD4, 0xA0, 0x0, 0x0], buffer);
//! assert_eq!((0x6A5, false), decode_identifier(&buffer));
//! ```
use crate::frame::{CanFrame, MAX_PAYLOAD};
use crate::registers::{DLC_MASK, EXIDE, RTR};
use byteorder::{BigEndian, ByteOrder};
use embedded_can::{ExtendedId, Frame, Id, StandardId};

pub const STANDARD_IDENTIFIER_MASK: u16 = 0x7FF;

pub const EXTENDED_IDENTIFIER_MASK: u32 = 0x1FFF_FFFF;

/// Number of identifier bytes (SIDH, SIDL, EID8, EID0)
pub const IDENTIFIER_SIZE: usize = 4;

/// Size of a receive/transmit buffer block: identifier, DLC and 8 data bytes
pub const MESSAGE_BLOCK_SIZE: usize = IDENTIFIER_SIZE + 1 + MAX_PAYLOAD;

/// Packs the identifier into the SIDH, SIDL, EID8 and EID0 register layout
pub fn encode_identifier(dest: &mut [u8; IDENTIFIER_SIZE], id: u32, extended: bool) {
    if extended {
        dest[0] = (id >> 21) as u8;
        dest[1] = ((id >> 13) & (0b111 << 5)) as u8 | EXIDE | ((id >> 16) & 0b11) as u8;
        BigEndian::write_u16(&mut dest[2..], id as u16);
        return;
    }

    dest[0] = (id >> 3) as u8;
    dest[1] = (id << 5) as u8;
    dest[2] = 0;
    dest[3] = 0;
}

/// Unpacks identifier and extended flag from the SIDH, SIDL, EID8 and EID0 register layout
pub fn decode_identifier(source: &[u8; IDENTIFIER_SIZE]) -> (u32, bool) {
    if source[1] & EXIDE != 0 {
        let id = ((source[0] as u32) << 21)
            | (((source[1] & (0b111 << 5)) as u32) << 13)
            | (((source[1] & 0b11) as u32) << 16)
            | BigEndian::read_u16(&source[2..]) as u32;

        return (id, true);
    }

    let id = ((source[0] as u32) << 3) | ((source[1] as u32) >> 5);
    (id, false)
}

/// Encodes an [embedded_can::Id] into register layout
pub fn encode_id(dest: &mut [u8; IDENTIFIER_SIZE], identifier: Id) {
    match identifier {
        Id::Standard(sid) => encode_identifier(dest, sid.as_raw() as u32, false),
        Id::Extended(eid) => encode_identifier(dest, eid.as_raw(), true),
    }
}

/// Decodes register layout into an [embedded_can::Id]
pub fn decode_id(source: &[u8; IDENTIFIER_SIZE]) -> Id {
    match decode_identifier(source) {
        (id, true) => Id::Extended(ExtendedId::new(id & EXTENDED_IDENTIFIER_MASK).unwrap_or(ExtendedId::ZERO)),
        (id, false) => {
            Id::Standard(StandardId::new(id as u16 & STANDARD_IDENTIFIER_MASK).unwrap_or(StandardId::ZERO))
        }
    }
}

/// Lays out the frame as transmit buffer block
pub fn encode_block(frame: &CanFrame) -> [u8; MESSAGE_BLOCK_SIZE] {
    let mut block = [0u8; MESSAGE_BLOCK_SIZE];
    let mut identifier = [0u8; IDENTIFIER_SIZE];

    encode_id(&mut identifier, frame.id());

    let data = frame.data();
    block[..IDENTIFIER_SIZE].copy_from_slice(&identifier);
    block[IDENTIFIER_SIZE] = frame.dlc() as u8;
    if frame.is_remote_frame() {
        block[IDENTIFIER_SIZE] |= RTR;
    }
    block[IDENTIFIER_SIZE + 1..IDENTIFIER_SIZE + 1 + data.len()].copy_from_slice(data);

    block
}

/// Decodes a receive buffer block into the given frame.
/// Data length codes above 8 are treated as 8.
pub fn decode_block(block: &[u8; MESSAGE_BLOCK_SIZE], frame: &mut CanFrame) {
    let mut identifier = [0u8; IDENTIFIER_SIZE];
    identifier.copy_from_slice(&block[..IDENTIFIER_SIZE]);

    let control = block[IDENTIFIER_SIZE];
    let length = ((control & DLC_MASK) as usize).min(MAX_PAYLOAD);

    if control & RTR != 0 {
        frame.load_remote(decode_id(&identifier), length);
        return;
    }

    let data = &block[IDENTIFIER_SIZE + 1..IDENTIFIER_SIZE + 1 + length];
    frame.load(decode_id(&identifier), data);
}
