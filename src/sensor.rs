//! Battery state service - samples the battery and publishes changes.
//!
//! Implementation based upon the PineTime wiki: the battery voltage is
//! read through a 1/2 divider on the SAADC, and a dedicated pin is pulled
//! low by the charger while external power is present.

use battery_indicator::battery::{
    millivolts_from_adc, percent_from_millivolts, BatteryMonitor, ChargeState,
};
use battery_indicator::config::BATTERY_POLL_SECS;
use defmt::info;
use embassy_nrf::gpio::Input;
use embassy_nrf::saadc::Saadc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

/// Latest battery state, signalled on every change.
pub static BATTERY_STATE: Signal<CriticalSectionRawMutex, ChargeState> = Signal::new();

/// Battery hardware: SAADC channel plus charge indication pin.
pub struct BatterySensor<'d> {
    adc: Saadc<'d, 1>,
    /// High = battery, low = charging.
    charge_indication: Input<'d>,
}

impl<'d> BatterySensor<'d> {
    pub fn new(adc: Saadc<'d, 1>, charge_indication: Input<'d>) -> Self {
        Self {
            adc,
            charge_indication,
        }
    }

    /// Take one sample of the battery.
    pub async fn sample(&mut self) -> ChargeState {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        let millivolts = millivolts_from_adc(buf[0]);
        ChargeState::new(
            percent_from_millivolts(millivolts),
            self.charge_indication.is_low(),
        )
    }
}

/// Poll the battery every `BATTERY_POLL_SECS` and signal changes.
#[embassy_executor::task]
pub async fn battery_task(mut sensor: BatterySensor<'static>) -> ! {
    let mut monitor = BatteryMonitor::new();

    loop {
        let state = sensor.sample().await;
        if monitor.update(state) {
            info!(
                "Battery: {}% ({})",
                state.charge_percent,
                if state.is_charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            BATTERY_STATE.signal(state);
        }

        Timer::after(Duration::from_secs(BATTERY_POLL_SECS)).await;
    }
}
