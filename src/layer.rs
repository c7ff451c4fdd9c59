//! Minimal retained layer model used by the watch face compositor.
//!
//! A layer owns a frame in screen coordinates, a hidden flag and a dirty
//! flag. Drawing code works in layer-local coordinates; the compositor
//! translates the draw target to the frame origin.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;

/// A rectangular drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    frame: Rectangle,
    hidden: bool,
    dirty: bool,
}

impl Layer {
    /// New layers start visible and dirty so the first pass draws them.
    pub const fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            hidden: false,
            dirty: true,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// The frame with its origin moved to zero.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.frame.size)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Change visibility. Marks the layer dirty when the flag flips.
    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            self.hidden = hidden;
            self.dirty = true;
        }
    }

    /// Request a redraw on the next compositor pass.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

/// A layer that renders one line of monospaced text.
pub struct TextLayer<C, const N: usize>
where
    C: PixelColor,
{
    layer: Layer,
    text: String<N>,
    font: &'static MonoFont<'static>,
    color: C,
    alignment: Alignment,
}

impl<C, const N: usize> TextLayer<C, N>
where
    C: PixelColor,
{
    pub fn new(frame: Rectangle, font: &'static MonoFont<'static>, color: C) -> Self {
        Self {
            layer: Layer::new(frame),
            text: String::new(),
            font,
            color,
            alignment: Alignment::Left,
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the text, truncated to the layer capacity.
    pub fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.layer.mark_dirty();
    }

    pub fn color(&self) -> C {
        self.color
    }

    pub fn set_color(&mut self, color: C) {
        if self.color != color {
            self.color = color;
            self.layer.mark_dirty();
        }
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.layer.mark_dirty();
    }

    /// Draw the text inside the frame. Hidden layers draw nothing.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        if self.layer.is_hidden() || self.text.is_empty() {
            return Ok(());
        }

        let frame = self.layer.frame();
        let mut local = target.translated(frame.top_left);
        let mut clipped = local.clipped(&self.layer.bounds());

        let x = match self.alignment {
            Alignment::Left => 0,
            Alignment::Center => (frame.size.width / 2) as i32,
            Alignment::Right => frame.size.width as i32 - 1,
        };
        let style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(
            self.text.as_str(),
            Point::new(x, 0),
            MonoTextStyle::new(self.font, self.color),
            style,
        )
        .draw(&mut clipped)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn new_layer_is_visible_and_dirty() {
        let mut layer = Layer::new(Rectangle::new(Point::new(4, 5), Size::new(10, 6)));
        assert!(!layer.is_hidden());
        assert!(layer.take_dirty());
        assert!(!layer.take_dirty());
        assert_eq!(layer.bounds(), Rectangle::new(Point::zero(), Size::new(10, 6)));
    }

    #[test]
    fn set_hidden_marks_dirty_only_on_change() {
        let mut layer = Layer::new(Rectangle::zero());
        layer.take_dirty();
        layer.set_hidden(false);
        assert!(!layer.is_dirty());
        layer.set_hidden(true);
        assert!(layer.is_dirty());
    }

    #[test]
    fn text_is_truncated_to_capacity() {
        let mut label: TextLayer<BinaryColor, 3> =
            TextLayer::new(Rectangle::zero(), &FONT_6X10, BinaryColor::On);
        label.set_text("12345");
        assert_eq!(label.text(), "123");
    }

    #[test]
    fn right_aligned_text_ends_at_frame_edge() {
        let frame = Rectangle::new(Point::new(10, 0), Size::new(30, 10));
        let mut label: TextLayer<BinaryColor, 3> =
            TextLayer::new(frame, &FONT_6X10, BinaryColor::On);
        label.set_alignment(Alignment::Right);
        label.set_text("88");

        let mut display = MockDisplay::new();
        label.draw(&mut display).unwrap();

        let area = display.affected_area();
        assert!(area.top_left.x >= 10);
        assert!(area.top_left.x + area.size.width as i32 <= 40);
        // Right alignment pushes both glyphs past the frame midpoint.
        assert!(area.top_left.x >= 25);
    }

    #[test]
    fn hidden_text_layer_draws_nothing() {
        let mut label: TextLayer<BinaryColor, 3> = TextLayer::new(
            Rectangle::new(Point::zero(), Size::new(20, 10)),
            &FONT_6X10,
            BinaryColor::On,
        );
        label.set_text("Chg");
        label.layer_mut().set_hidden(true);

        let mut display = MockDisplay::new();
        label.draw(&mut display).unwrap();
        assert_eq!(display, MockDisplay::new());
    }
}
