//! Battery charge state as reported by the host battery service.
//!
//! Voltage conversion follows the PineTime wiki: the battery is sampled
//! through a 1/2 resistor divider on a 12-bit SAADC with a 3.3 V
//! reference, and the charge percentage is interpolated between fixed
//! voltage data points.

/// Snapshot of the battery returned by the host on every query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeState {
    /// Charge in percent (0-100).
    pub charge_percent: u8,
    /// `true` while external power is connected.
    pub is_charging: bool,
}

impl ChargeState {
    /// Build a snapshot, clamping the percentage to 100.
    pub const fn new(charge_percent: u8, is_charging: bool) -> Self {
        Self {
            charge_percent: if charge_percent > 100 { 100 } else { charge_percent },
            is_charging,
        }
    }
}

/// Convert a raw 12-bit SAADC sample into battery millivolts.
///
/// Negative samples (noise around ground) read as 0 mV.
pub fn millivolts_from_adc(raw: i16) -> u16 {
    let raw = raw.clamp(0, 4095) as u32;
    // Multiply by 2 * 1000 for the divider and mV, divide by 4096 / 3.3 V.
    // Use u32 during calculation to prevent overflow.
    (raw * 2000 / 1241) as u16
}

/// Estimate remaining capacity from the battery voltage.
///
/// Linear interpolation between 3450 mV (empty), 3700 mV (half) and
/// 4200 mV (full).
pub fn percent_from_millivolts(millivolts: u16) -> u8 {
    (match millivolts {
        0..=3449 => 0,
        3450..=3699 => (millivolts - 3450) / 5,
        3700..=4199 => 50 + (millivolts - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Remembers the last published charge state so the battery service only
/// emits events when something changed.
#[derive(Debug, Default)]
pub struct BatteryMonitor {
    last: Option<ChargeState>,
}

impl BatteryMonitor {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed a fresh sample. Returns `true` if it differs from the last one.
    pub fn update(&mut self, state: ChargeState) -> bool {
        if self.last == Some(state) {
            return false;
        }
        self.last = Some(state);
        true
    }

    /// Last recorded state, if any sample was taken yet.
    pub fn last(&self) -> Option<ChargeState> {
        self.last
    }
}
