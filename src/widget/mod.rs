//! Battery indicator widget - icon plus percentage label.
//!
//! The widget owns two layers: the icon layer at the frame passed to
//! [`BatteryIndicator::create`] and a right-aligned label layer sitting
//! just left of it. Battery events only mark the icon dirty; the actual
//! redraw happens on the compositor's next pass, which peeks the current
//! charge state from the host.


use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::Alignment;

use crate::config::{
    INBOX_SIZE, LABEL_GAP, LABEL_USES_LEVEL_COLOR, LABEL_WIDTH, MESSAGE_KEY_SHOW_BATTERY_PERCENT,
    OUTBOX_SIZE,
};
use crate::geometry::{IndicatorGeometry, STROKE};
use crate::host::WatchHost;
use crate::layer::{Layer, TextLayer};
use crate::message::Dictionary;
use crate::palette::{ChargeLevel, IndicatorColors};
use crate::prefs::Preferences;
use crate::status::{StatusText, STATUS_TEXT_CAPACITY};

/// Frame of the label layer for an icon at `frame`.
///
/// The label is as tall as one line of the label font, vertically
/// centred on the icon and right-aligned against it.
pub fn label_frame(frame: Rectangle) -> Rectangle {
    let height = FONT_6X10.character_size.height;
    let x = frame.top_left.x - (LABEL_GAP + LABEL_WIDTH) as i32;
    let y = frame.top_left.y + (frame.size.height as i32 - height as i32) / 2;
    Rectangle::new(Point::new(x, y), Size::new(LABEL_WIDTH, height))
}

/// Battery icon and status label bound to one watch face.
pub struct BatteryIndicator<C>
where
    C: IndicatorColors,
{
    icon: Layer,
    label: TextLayer<C, STATUS_TEXT_CAPACITY>,
    geometry: IndicatorGeometry,
    status: StatusText,
}

impl<C> BatteryIndicator<C>
where
    C: IndicatorColors,
{
    /// Build both layers, subscribe to battery events and open the
    /// message channel.
    ///
    /// The label starts hidden if the stored preference says so.
    pub fn create<H: WatchHost>(host: &mut H, frame: Rectangle, prefs: &Preferences) -> Self {
        let mut label = TextLayer::new(label_frame(frame), &FONT_6X10, C::FOREGROUND);
        label.set_alignment(Alignment::Right);
        label
            .layer_mut()
            .set_hidden(!prefs.show_battery_percent());

        let icon = Layer::new(frame);
        let geometry = IndicatorGeometry::new(icon.bounds().size);

        host.battery_subscribe();
        host.open_messages(INBOX_SIZE, OUTBOX_SIZE);

        Self {
            icon,
            label,
            geometry,
            status: StatusText::new(),
        }
    }

    /// Schedule a redraw on the next compositor pass.
    pub fn refresh(&mut self) {
        self.icon.mark_dirty();
    }

    /// Battery service callback.
    pub fn battery_state_changed(&mut self) {
        self.refresh();
    }

    /// Apply an inbound preference message.
    ///
    /// A show-battery-percent value of 1 shows the label, 0 hides it; the
    /// choice is written to `prefs` for persisting. Messages without the
    /// key, or with any other value, change nothing. Returns the applied
    /// visibility.
    pub fn handle_message(&mut self, message: &Dictionary<'_>, prefs: &mut Preferences) -> Option<bool> {
        let value = message
            .find(MESSAGE_KEY_SHOW_BATTERY_PERCENT)
            .and_then(|t| t.as_int())?;
        let show = match value {
            1 => true,
            0 => false,
            _ => return None,
        };

        prefs.set_show_battery_percent(show);
        self.label.layer_mut().set_hidden(!show);
        Some(show)
    }

    /// Whether either layer waits for a redraw.
    pub fn needs_redraw(&self) -> bool {
        self.icon.is_dirty() || self.label.layer().is_dirty()
    }

    pub fn icon(&self) -> &Layer {
        &self.icon
    }

    pub fn label(&self) -> &TextLayer<C, STATUS_TEXT_CAPACITY> {
        &self.label
    }

    /// Redraw both layers from the host's current battery state.
    pub fn draw<H, D>(&mut self, host: &H, target: &mut D) -> Result<(), D::Error>
    where
        H: WatchHost,
        D: DrawTarget<Color = C>,
    {
        let state = host.battery_peek();
        let percent = state.charge_percent;

        self.status.update(&state);
        self.label.set_text(self.status.as_str());

        let fill_color = C::fill(ChargeLevel::from_percent(percent));
        self.label.set_color(if LABEL_USES_LEVEL_COLOR {
            fill_color
        } else {
            C::FOREGROUND
        });

        let outline_style = PrimitiveStyleBuilder::new()
            .stroke_color(C::FOREGROUND)
            .stroke_width(STROKE)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        {
            let mut local = target.translated(self.icon.frame().top_left);
            self.geometry
                .fill(percent)
                .into_styled(PrimitiveStyle::with_fill(fill_color))
                .draw(&mut local)?;
            self.geometry
                .outline
                .into_styled(outline_style)
                .draw(&mut local)?;
            self.geometry.nub.into_styled(outline_style).draw(&mut local)?;
        }
        self.label.draw(target)?;

        self.icon.take_dirty();
        self.label.layer_mut().take_dirty();
        Ok(())
    }

    /// Unsubscribe from battery events and release both layers.
    pub fn destroy<H: WatchHost>(self, host: &mut H) {
        host.battery_unsubscribe();
    }
}
