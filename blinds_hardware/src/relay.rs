//! GPIO relay actuator (Raspberry Pi, `rppal`).
//!
//! Two relays: one per winding. The interlock drops the opposite relay
//! before energizing a winding; `stop` drops both.

use rppal::gpio::{Gpio, OutputPin};

use crate::error::HwError;
use blinds_traits::Actuator;

pub struct RelayActuator {
    open_pin: OutputPin,
    close_pin: OutputPin,
}

impl RelayActuator {
    pub fn new(open_pin: u8, close_pin: u8) -> Result<Self, HwError> {
        let gpio = Gpio::new().map_err(|e| HwError::Gpio(e.to_string()))?;
        let mut open_pin = gpio
            .get(open_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_output();
        let mut close_pin = gpio
            .get(close_pin)
            .map_err(|e| HwError::Gpio(e.to_string()))?
            .into_output();
        open_pin.set_low();
        close_pin.set_low();
        Ok(Self {
            open_pin,
            close_pin,
        })
    }
}

impl Actuator for RelayActuator {
    fn drive_open(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.close_pin.set_low();
        self.open_pin.set_high();
        tracing::debug!("relay: drive open");
        Ok(())
    }

    fn drive_close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.open_pin.set_low();
        self.close_pin.set_high();
        tracing::debug!("relay: drive close");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.open_pin.set_low();
        self.close_pin.set_low();
        tracing::debug!("relay: stop");
        Ok(())
    }
}
