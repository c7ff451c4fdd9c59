//! Unified error type for battery-indicator.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// The widget itself treats every host call as infallible; these errors
/// only surface in firmware glue, where they are logged and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Messages
    /// An inbound app message could not be decoded.
    Message(MessageError),

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Display
    /// I²C transaction to the display failed.
    Display,

    // BLE
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),
}

/// Reasons an app message envelope is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// The envelope ended before the declared tuples did.
    Truncated,
    /// A tuple carried an unknown value kind.
    UnknownKind(u8),
    /// The envelope exceeds the inbox size.
    TooLarge,
}

/// Subset of BLE errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Advertising could not start or was interrupted.
    AdvertiseFailed,
}

// Convenience conversions

impl From<MessageError> for Error {
    fn from(e: MessageError) -> Self {
        Error::Message(e)
    }
}

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
