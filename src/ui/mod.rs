//! User interface subsystem - watch face on the SSD1306 OLED.
//!
//! The UI task owns the watch face, the display and the host services
//! the battery indicator talks to. It reacts to battery changes and
//! inbound messages, and runs a compositor pass on every frame tick.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C (monochrome)
//! - **Host**: [`FirmwareHost`], the widget-facing view of the battery
//!   service and the message transport

pub mod display;

use battery_indicator::config::FRAME_INTERVAL_MS;
use battery_indicator::{ChargeState, Dictionary, Error, WatchFace, WatchHost};
use defmt::{debug, info, warn};
use embassy_futures::select::{select3, Either3};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embassy_time::{Duration, Ticker};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use nrf_softdevice::{Flash, Softdevice};

use crate::ble::INBOX;
use crate::sensor::BATTERY_STATE;
use crate::storage;

/// Battery icon position on the 128×64 panel (top right corner).
const BATTERY_FRAME: Rectangle = Rectangle::new(Point::new(96, 2), Size::new(30, 12));

/// Widget-facing host services backed by the firmware tasks.
pub struct FirmwareHost {
    battery: ChargeState,
    battery_subscribed: bool,
    messages_open: bool,
}

impl FirmwareHost {
    pub const fn new(initial: ChargeState) -> Self {
        Self {
            battery: initial,
            battery_subscribed: false,
            messages_open: false,
        }
    }

    /// Record a new battery sample. Returns whether subscribers should
    /// be notified.
    fn battery_changed(&mut self, state: ChargeState) -> bool {
        self.battery = state;
        self.battery_subscribed
    }
}

impl WatchHost for FirmwareHost {
    fn battery_peek(&self) -> ChargeState {
        self.battery
    }

    fn battery_subscribe(&mut self) {
        self.battery_subscribed = true;
    }

    fn battery_unsubscribe(&mut self) {
        self.battery_subscribed = false;
    }

    fn open_messages(&mut self, inbox_size: usize, outbox_size: usize) {
        // The GATT server is always listening; only record that a widget
        // wants the messages.
        info!("Messages open: inbox={} outbox={}", inbox_size, outbox_size);
        self.messages_open = true;
    }
}

/// Run the watch face.
#[embassy_executor::task]
pub async fn ui_task(twim: Twim<'static, TWISPI0>, sd: &'static Softdevice) -> ! {
    let mut flash = Flash::take(sd);
    let mut prefs = storage::load_preferences(&mut flash).await;

    let mut display = display::init(twim);
    let mut host = FirmwareHost::new(BATTERY_STATE.wait().await);
    let mut face: WatchFace<BinaryColor> = WatchFace::new();
    face.add_battery_indicator(&mut host, BATTERY_FRAME, &prefs);

    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        match select3(BATTERY_STATE.wait(), INBOX.receive(), ticker.next()).await {
            Either3::First(state) => {
                if host.battery_changed(state) {
                    face.battery_state_changed();
                }
            }
            Either3::Second(raw) => {
                if !host.messages_open {
                    continue;
                }
                match Dictionary::parse(&raw) {
                    Ok(message) => {
                        if let Some(show) = face.handle_message(&message, &mut prefs) {
                            info!("Battery percent label: {}", if show { "shown" } else { "hidden" });
                            let _ = storage::save_preferences(&mut flash, &mut prefs).await;
                        }
                    }
                    Err(e) => debug!("Dropping malformed message: {:?}", Error::from(e)),
                }
            }
            Either3::Third(()) => match face.render(&host, &mut display) {
                Ok(true) => {
                    let _ = display::flush(&mut display);
                }
                Ok(false) => {}
                Err(_) => warn!("Display: draw failed"),
            },
        }
    }
}
