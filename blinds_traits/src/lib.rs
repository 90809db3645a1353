pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Relay-level motor triggers for a single cover.
///
/// The three calls map directly onto the hardware relays: energize the
/// open winding, energize the close winding, or de-energize both. They are
/// fire-and-forget at the controller level; a returned error is logged by
/// the caller and never aborts a move.
pub trait Actuator {
    fn drive_open(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn drive_close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Observer for the estimated cover state.
///
/// `position` and `tilt` are fractions in [0, 1]: 0 = fully open / flat,
/// 1 = fully closed / fully tilted.
pub trait StateSink {
    fn publish(&mut self, position: f32, tilt: f32);
}

impl<T: Actuator + ?Sized> Actuator for Box<T> {
    fn drive_open(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).drive_open()
    }
    fn drive_close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).drive_close()
    }
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).stop()
    }
}

impl<T: StateSink + ?Sized> StateSink for Box<T> {
    fn publish(&mut self, position: f32, tilt: f32) {
        (**self).publish(position, tilt)
    }
}
