//! User preferences, cached in RAM and synced with flash.
//!
//! The firmware loads the cache at boot and writes it back whenever it
//! is dirty. The flash record for each flag is a single byte.

use crate::config::DEFAULT_SHOW_BATTERY_PERCENT;

/// In-memory cache of the persisted preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preferences {
    show_battery_percent: bool,
    /// Dirty flag - true if cache differs from flash.
    dirty: bool,
}

impl Preferences {
    pub const fn new() -> Self {
        Self {
            show_battery_percent: DEFAULT_SHOW_BATTERY_PERCENT,
            dirty: false,
        }
    }

    /// Restore a value read from flash without marking the cache dirty.
    pub fn restore_show_battery_percent(&mut self, record: &[u8]) {
        if let Some(show) = decode_flag(record) {
            self.show_battery_percent = show;
        }
    }

    pub fn show_battery_percent(&self) -> bool {
        self.show_battery_percent
    }

    pub fn set_show_battery_percent(&mut self, show: bool) {
        if self.show_battery_percent != show {
            self.show_battery_percent = show;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Call after a successful flash write.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new()
    }
}

/// Flash record for a boolean flag.
pub fn encode_flag(value: bool) -> [u8; 1] {
    [value as u8]
}

/// Decode a boolean flash record. Anything but a single 0/1 byte is corrupt.
pub fn decode_flag(record: &[u8]) -> Option<bool> {
    match record {
        [0] => Some(false),
        [1] => Some(true),
        _ => None,
    }
}
