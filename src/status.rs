//! Short battery status label.
//!
//! The label buffer holds three characters. Formatting truncates like
//! `snprintf` into a four byte C buffer, so a full battery reads "100"
//! with the percent sign dropped.

use core::fmt::{self, Write};

use heapless::String;

use crate::battery::ChargeState;

/// Label capacity in characters.
pub const STATUS_TEXT_CAPACITY: usize = 3;

/// Text shown while external power is connected.
pub const CHARGING_TEXT: &str = "Chg";

/// Fixed-capacity status string ("Chg", "57%", "100").
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusText {
    buf: String<STATUS_TEXT_CAPACITY>,
}

impl StatusText {
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Build the label for `state`.
    pub fn for_state(state: &ChargeState) -> Self {
        let mut text = Self::new();
        text.update(state);
        text
    }

    /// Overwrite the label with the text for `state`.
    pub fn update(&mut self, state: &ChargeState) {
        self.buf.clear();
        let mut out = Truncating(&mut self.buf);
        let _ = if state.is_charging {
            out.write_str(CHARGING_TEXT)
        } else {
            write!(out, "{}%", state.charge_percent)
        };
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }
}

/// Writer that silently drops whatever does not fit.
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
