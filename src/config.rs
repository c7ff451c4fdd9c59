//! Application-wide constants and compile-time configuration.
//!
//! Widget geometry knobs, message keys, BLE identifiers, hardware pin
//! assignments and timing parameters live here so they can be tuned in
//! one place.

// Battery indicator

/// Width of the label layer that sits left of the battery icon (px).
pub const LABEL_WIDTH: u32 = 25;

/// Horizontal gap between the label's right edge and the icon (px).
pub const LABEL_GAP: u32 = 2;

/// Tint the percentage label with the fill colour on colour displays.
/// The label stays white when disabled (and always on monochrome panels).
pub const LABEL_USES_LEVEL_COLOR: bool = false;

/// Label visibility used until the user sends a preference.
pub const DEFAULT_SHOW_BATTERY_PERCENT: bool = true;

// App messages

/// Dictionary key carrying the "show battery percent" integer (1 = show).
pub const MESSAGE_KEY_SHOW_BATTERY_PERCENT: u32 = 1;

/// Largest inbound message the transport accepts (bytes).
/// Matches the usable ATT payload for a 247 byte MTU.
pub const INBOX_SIZE: usize = 244;

/// Largest outbound message the transport accepts (bytes).
pub const OUTBOX_SIZE: usize = 244;

// Persistent storage

/// Flash map key for the persisted "show battery percent" flag.
pub const PERSIST_KEY_SHOW_BATTERY_PERCENT: u8 = 0x01;

/// Flash page index where preference storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for preference storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;

// BLE

/// Advertised device name.
pub const BLE_DEVICE_NAME: &str = "BattFace";

/// Advertising interval (in 0.625 ms units). 400 = 250 ms.
pub const BLE_ADV_INTERVAL: u32 = 400;

// Battery sensing
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// types are selected in `main.rs`.  Adjust for your custom PCB.
//
//   Battery voltage (1/2 divider) → P0.31 / AIN7
//   Charge indication (low = charging) → P0.12
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Interval between battery samples (seconds).
pub const BATTERY_POLL_SECS: u64 = 10;

// Display

/// Compositor tick - the longest a dirty layer waits for a redraw (ms).
pub const FRAME_INTERVAL_MS: u64 = 100;
