//! Watch face root - parents the battery indicator and runs the
//! compositor pass.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::host::WatchHost;
use crate::message::Dictionary;
use crate::palette::IndicatorColors;
use crate::prefs::Preferences;
use crate::widget::BatteryIndicator;

/// Root of the layer tree.
pub struct WatchFace<C>
where
    C: IndicatorColors,
{
    battery: Option<BatteryIndicator<C>>,
    /// Full clear pending (set when a child is removed).
    needs_clear: bool,
}

impl<C> WatchFace<C>
where
    C: IndicatorColors,
{
    pub const fn new() -> Self {
        Self {
            battery: None,
            needs_clear: true,
        }
    }

    /// Create the battery indicator at `frame` and attach it.
    ///
    /// An indicator that is already attached is destroyed first.
    pub fn add_battery_indicator<H: WatchHost>(
        &mut self,
        host: &mut H,
        frame: Rectangle,
        prefs: &Preferences,
    ) {
        self.remove_battery_indicator(host);
        self.battery = Some(BatteryIndicator::create(host, frame, prefs));
    }

    /// Detach and destroy the battery indicator. No-op if none is attached.
    pub fn remove_battery_indicator<H: WatchHost>(&mut self, host: &mut H) {
        if let Some(battery) = self.battery.take() {
            battery.destroy(host);
            self.needs_clear = true;
        }
    }

    pub fn battery_indicator(&self) -> Option<&BatteryIndicator<C>> {
        self.battery.as_ref()
    }

    /// Forward a battery service event to subscribed children.
    pub fn battery_state_changed(&mut self) {
        if let Some(battery) = self.battery.as_mut() {
            battery.battery_state_changed();
        }
    }

    /// Route an inbound message. Returns the applied label visibility.
    pub fn handle_message(
        &mut self,
        message: &Dictionary<'_>,
        prefs: &mut Preferences,
    ) -> Option<bool> {
        self.battery
            .as_mut()
            .and_then(|battery| battery.handle_message(message, prefs))
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_clear || self.battery.as_ref().is_some_and(|b| b.needs_redraw())
    }

    /// Compositor pass: if anything is dirty, clear the target and redraw
    /// every layer. Returns whether the target was touched.
    pub fn render<H, D>(&mut self, host: &H, target: &mut D) -> Result<bool, D::Error>
    where
        H: WatchHost,
        D: DrawTarget<Color = C>,
    {
        if !self.needs_redraw() {
            return Ok(false);
        }

        target.clear(C::BACKGROUND)?;
        if let Some(battery) = self.battery.as_mut() {
            battery.draw(host, target)?;
        }
        self.needs_clear = false;
        Ok(true)
    }
}

impl<C> Default for WatchFace<C>
where
    C: IndicatorColors,
{
    fn default() -> Self {
        Self::new()
    }
}
