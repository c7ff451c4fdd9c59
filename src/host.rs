//! Services the watch face host provides to widgets.
//!
//! The firmware implements this on top of the Embassy tasks; host tests
//! use a recording fake.

use crate::battery::ChargeState;

/// Host-side battery and messaging services.
///
/// All calls are infallible from the widget's point of view.
pub trait WatchHost {
    /// Current battery snapshot.
    fn battery_peek(&self) -> ChargeState;

    /// Start delivering battery change events to the watch face.
    fn battery_subscribe(&mut self);

    /// Stop delivering battery change events.
    fn battery_unsubscribe(&mut self);

    /// Open the inbound/outbound message channel with the given buffer sizes.
    fn open_messages(&mut self, inbox_size: usize, outbox_size: usize);
}
