//! Battery indicator widget for a watch face.
//!
//! This crate holds the pure, host-testable part of the firmware: the
//! widget and the watch face that parents it, icon geometry, status text,
//! colour selection, the inbound message dictionary and the preference
//! cache. Everything renders through `embedded-graphics` draw targets.
//!
//! Usage: `cargo test --lib` (unit tests) or `cargo test` (adds `tests/`).
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod layer;
pub mod message;
pub mod palette;
pub mod prefs;
pub mod status;
pub mod watchface;
pub mod widget;

pub use battery::ChargeState;
pub use error::Error;
pub use host::WatchHost;
pub use message::Dictionary;
pub use prefs::Preferences;
pub use watchface::WatchFace;
pub use widget::BatteryIndicator;
