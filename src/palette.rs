//! Charge-level colours for colour and monochrome panels.

use embedded_graphics::pixelcolor::{BinaryColor, Rgb565, RgbColor};
use embedded_graphics::prelude::PixelColor;

/// Charge bucket used to pick the fill colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeLevel {
    /// 50 % and above.
    High,
    /// 30 % up to 49 %.
    Medium,
    /// Below 30 %.
    Low,
}

impl ChargeLevel {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            50.. => ChargeLevel::High,
            30..=49 => ChargeLevel::Medium,
            _ => ChargeLevel::Low,
        }
    }
}

/// Colours the indicator needs from a display's pixel type.
pub trait IndicatorColors: PixelColor {
    /// Watch face background.
    const BACKGROUND: Self;
    /// Battery outline, nub and default label colour.
    const FOREGROUND: Self;

    /// Fill colour for a charge level.
    fn fill(level: ChargeLevel) -> Self;
}

impl IndicatorColors for Rgb565 {
    const BACKGROUND: Self = Rgb565::BLACK;
    const FOREGROUND: Self = Rgb565::WHITE;

    fn fill(level: ChargeLevel) -> Self {
        match level {
            ChargeLevel::High => Rgb565::GREEN,
            ChargeLevel::Medium => Rgb565::YELLOW,
            ChargeLevel::Low => Rgb565::RED,
        }
    }
}

/// Monochrome panels draw every level in the foreground colour.
impl IndicatorColors for BinaryColor {
    const BACKGROUND: Self = BinaryColor::Off;
    const FOREGROUND: Self = BinaryColor::On;

    fn fill(_level: ChargeLevel) -> Self {
        BinaryColor::On
    }
}
