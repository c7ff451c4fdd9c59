//! Battery indicator watch face firmware for nRF52840.
//!
//! Tasks:
//! - `softdevice_task` / `ble_task`: BLE peripheral receiving app messages
//! - `battery_task`: samples the battery and signals changes
//! - `ui_task`: owns the watch face, persists preferences, drives the OLED

#![no_std]
#![no_main]

mod ble;
mod sensor;
mod storage;
mod ui;

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::saadc::{self, ChannelConfig, Resolution, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use panic_probe as _;

use crate::sensor::BatterySensor;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("battery-indicator starting");

    // Priorities 0, 1 and 4 are reserved for the SoftDevice.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    // Battery: 12-bit SAADC on the divided battery voltage.
    let mut saadc_config = saadc::Config::default();
    saadc_config.resolution = Resolution::_12BIT;
    let channel = ChannelConfig::single_ended(p.P0_31);
    let adc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel]);
    adc.calibrate().await;
    let charge_indication = Input::new(p.P0_12, Pull::None);
    let sensor = BatterySensor::new(adc, charge_indication);

    // Display: I²C at 400 kHz.
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let twim = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);

    let (sd, server) = ble::init();

    unwrap!(spawner.spawn(ble::softdevice_task(sd)));
    unwrap!(spawner.spawn(sensor::battery_task(sensor)));
    unwrap!(spawner.spawn(ble::ble_task(sd, server)));
    unwrap!(spawner.spawn(ui::ui_task(twim, sd)));

    info!("Initialization finished");
}
