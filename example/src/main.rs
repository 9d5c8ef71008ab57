#![no_std]
#![no_main]

pub mod clock;
pub mod mutex;

use crate::clock::SystemClock;
use embedded_can::{Frame, StandardId};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::ExclusiveDevice;
use hal::clocks::Clock;
use hal::fugit::RateExtU32;
use hal::pac;
use mcp2515::can::{CanError, MCP2515};
use mcp2515::config::Configuration;
use mcp2515::frame::CanFrame;
use mcp2515::status::OperationMode;
use panic_halt as _;
use rp2040_hal as hal;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const XTAL_FREQ_HZ: u32 = 12_000_000u32;

static CLOCK: SystemClock = SystemClock::default();

#[rp2040_hal::entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    CLOCK.initialize(timer);

    let sio = hal::Sio::new(pac.SIO);

    let pins = hal::gpio::Pins::new(pac.IO_BANK0, pac.PADS_BANK0, sio.gpio_bank0, &mut pac.RESETS);

    let spi_mosi = pins.gpio7.into_function::<hal::gpio::FunctionSpi>();
    let spi_miso = pins.gpio4.into_function::<hal::gpio::FunctionSpi>();
    let spi_sclk = pins.gpio6.into_function::<hal::gpio::FunctionSpi>();
    let spi = hal::spi::Spi::<_, _, _, 8>::new(pac.SPI0, (spi_mosi, spi_miso, spi_sclk));

    // Exchange the uninitialised SPI driver for an initialised one
    let spi = spi.init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        10.MHz(),
        embedded_hal::spi::MODE_0,
    );

    // Configure GPIO5 as an CS pin
    let pin_cs = pins.gpio5.into_push_pull_output();
    let spi_dev = ExclusiveDevice::new(spi, pin_cs, timer).unwrap();

    let mut controller = MCP2515::new(spi_dev);
    controller.initialize(&Configuration::default(), &mut timer).unwrap();

    // Transmitted frames are received again without bus access
    controller.set_mode(OperationMode::Loopback, &CLOCK).unwrap();

    let frame = CanFrame::new(StandardId::new(0x55).unwrap(), &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let mut received = CanFrame::default();

    loop {
        match controller.write(&frame) {
            Ok(()) | Err(CanError::TxBufferBusy) => {}
            Err(error) => panic!("{error:?}"),
        }

        timer.delay_ms(100);

        if controller.read(&mut received).is_ok() {
            assert_eq!(frame.data(), received.data());
        }
    }
}
