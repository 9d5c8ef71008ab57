use crate::registers::{CanStat, Register, TxbCtrl, REQOP_MASK, SIDL_STD_MASK, TXREQ};

#[test]
fn test_register_offset() {
    assert_eq!(Register::RXM0SIDL, Register::RXM0SIDH.offset(1));
    assert_eq!(Register::RXM0EID8, Register::RXM0SIDH.offset(2));
    assert_eq!(0x2F, u8::from(Register::CANCTRL));
}

#[test]
fn test_register_offset_wraps_at_end_of_address_space() {
    assert_eq!(Register(0x00), Register(0xFF).offset(1));
    assert_eq!(Register(0x01), Register(0xFF).offset(2));
}

#[test]
fn test_txb_ctrl() {
    assert_eq!(TXREQ, u8::from(TxbCtrl::new().with_txreq(true)));
    assert!(TxbCtrl::from(TXREQ).txreq());
    assert!(!TxbCtrl::from(!TXREQ).txreq());
    assert_eq!(0b11, TxbCtrl::from(0b0000_0011).txp());
}

#[test]
fn test_can_stat() {
    let register = CanStat::from(0b0100_1110);

    assert_eq!(0b010, register.opmod());
    assert_eq!(0b111, register.icod());

    // Operation mode bits share the position of CANCTRL.REQOP
    assert_eq!(REQOP_MASK, u8::from(CanStat::new().with_opmod(0b111)));
}

#[test]
fn test_sidl_standard_mask() {
    assert_eq!(0b1110_1000, SIDL_STD_MASK);
}
