//! Battery icon geometry.
//!
//! Layout inside a `w × h` layer (layer-local coordinates):
//! ```text
//!  0                  bw-1
//!  ┌────────────────────┐
//!  │ ██████████         ├─┐   ← nub (NUB_W × NUB_H, vertically centred)
//!  │ ██████████         ├─┘
//!  └────────────────────┘
//!  bw = w - NUB_W
//! ```
//! The fill starts `STROKE + FILL_PADDING` inside the outline and its
//! width follows `interior_width * (percent + 10) / 110`, so an empty
//! battery still shows a sliver.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Width of the terminal nub (px).
pub const NUB_W: u32 = 2;
/// Height of the terminal nub (px).
pub const NUB_H: u32 = 6;
/// Outline stroke width (px).
pub const STROKE: u32 = 1;
/// Gap between the outline and the fill (px).
pub const FILL_PADDING: u32 = 1;

/// Inset from the outline to the fill area on every side.
const INSET: u32 = STROKE + FILL_PADDING;

/// Width of the charged part of an interior `interior_width` pixels wide.
///
/// Non-decreasing in `percent`; percentages above 100 count as 100.
/// Returns at least one pixel for any non-empty interior.
pub fn fill_width(interior_width: u32, percent: u8) -> u32 {
    if interior_width == 0 {
        return 0;
    }
    let percent = percent.min(100) as u32;
    (interior_width * (percent + 10) / 110).max(1)
}

/// All rectangles making up the icon for one layer size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorGeometry {
    /// Battery body outline.
    pub outline: Rectangle,
    /// Area available to the fill.
    pub interior: Rectangle,
    /// Positive terminal on the right.
    pub nub: Rectangle,
}

impl IndicatorGeometry {
    /// Compute the icon layout for a layer of `size`.
    pub fn new(size: Size) -> Self {
        let body_w = size.width.saturating_sub(NUB_W);
        let h = size.height;

        let outline = Rectangle::new(Point::zero(), Size::new(body_w, h));
        let interior = Rectangle::new(
            Point::new(INSET as i32, INSET as i32),
            Size::new(
                body_w.saturating_sub(INSET * 2),
                h.saturating_sub(INSET * 2),
            ),
        );
        let nub = Rectangle::new(
            Point::new(body_w as i32 - 1, (h / 2) as i32 - (NUB_H / 2) as i32),
            Size::new(NUB_W + 1, NUB_H),
        );

        Self {
            outline,
            interior,
            nub,
        }
    }

    /// The charged part of the interior for `percent`.
    pub fn fill(&self, percent: u8) -> Rectangle {
        Rectangle::new(
            self.interior.top_left,
            Size::new(
                fill_width(self.interior.size.width, percent),
                self.interior.size.height,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_width_follows_linear_scale() {
        assert_eq!(fill_width(110, 0), 10);
        assert_eq!(fill_width(110, 50), 60);
        assert_eq!(fill_width(110, 100), 110);
        // 24 * 60 / 110 = 13.09
        assert_eq!(fill_width(24, 50), 13);
    }

    #[test]
    fn fill_width_never_exceeds_interior() {
        for w in [1u32, 5, 11, 24, 100, 240] {
            for p in 0..=100u8 {
                assert!(fill_width(w, p) <= w);
            }
            assert_eq!(fill_width(w, 100), w);
        }
    }

    #[test]
    fn fill_width_monotonic_and_positive() {
        for w in [1u32, 3, 10, 11, 24, 64] {
            let mut prev = 0;
            for p in 0..=100u8 {
                let fw = fill_width(w, p);
                assert!(fw > 0, "width {} at {}% is zero", w, p);
                assert!(fw >= prev);
                prev = fw;
            }
        }
    }

    #[test]
    fn fill_width_clamps_out_of_range_percent() {
        assert_eq!(fill_width(24, 200), fill_width(24, 100));
        assert_eq!(fill_width(0, 50), 0);
    }

    #[test]
    fn geometry_for_typical_layer() {
        let g = IndicatorGeometry::new(Size::new(30, 12));
        assert_eq!(g.outline, Rectangle::new(Point::zero(), Size::new(28, 12)));
        assert_eq!(g.interior, Rectangle::new(Point::new(2, 2), Size::new(24, 8)));
        assert_eq!(g.nub, Rectangle::new(Point::new(27, 3), Size::new(3, 6)));
        assert_eq!(g.fill(0).size, Size::new(2, 8));
        assert_eq!(g.fill(100).size, Size::new(24, 8));
    }

    #[test]
    fn geometry_degenerate_layer_does_not_underflow() {
        let g = IndicatorGeometry::new(Size::new(1, 2));
        assert_eq!(g.outline.size, Size::new(0, 2));
        assert_eq!(g.interior.size, Size::zero());
        assert_eq!(g.fill(50).size, Size::zero());
    }
}
