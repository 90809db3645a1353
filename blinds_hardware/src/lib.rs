pub mod error;
#[cfg(feature = "hardware")]
pub mod relay;

use blinds_traits::Actuator;

#[cfg(feature = "hardware")]
pub use relay::RelayActuator;

/// Simulated actuator: logs every trigger and tracks the commanded drive,
/// for development and CLI runs without relay hardware.
#[derive(Debug, Default)]
pub struct SimulatedActuator {
    driving: Option<Drive>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drive {
    Open,
    Close,
}

impl SimulatedActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a winding is currently commanded.
    pub fn is_driving(&self) -> bool {
        self.driving.is_some()
    }
}

impl Actuator for SimulatedActuator {
    fn drive_open(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.driving = Some(Drive::Open);
        tracing::info!("relay: drive open (simulated)");
        Ok(())
    }

    fn drive_close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.driving = Some(Drive::Close);
        tracing::info!("relay: drive close (simulated)");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.driving = None;
        tracing::info!("relay: stop (simulated)");
        Ok(())
    }
}
