use crate::config::{BitTiming, Configuration, BIT_TIMING};

#[test]
fn test_default_configuration() {
    assert!(Configuration::default().rx_interrupts);
}

#[test]
fn test_bit_timing_register_order() {
    assert_eq!([0x01, 0xB5, 0x00], BitTiming::KBPS_500.as_registers());
    assert_eq!([0x01, 0x91, 0x40], BitTiming::KBPS_1000.as_registers());
}

#[test]
#[cfg(not(feature = "kbps-1000"))]
fn test_selected_bit_timing() {
    assert_eq!(BitTiming::KBPS_500, BIT_TIMING);
}

#[test]
#[cfg(feature = "kbps-1000")]
fn test_selected_bit_timing() {
    assert_eq!(BitTiming::KBPS_1000, BIT_TIMING);
}
