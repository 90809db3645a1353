//! Public motion status types.

/// What the motor is currently commanded to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// At rest; both axes have reached their targets (or were stopped).
    #[default]
    Idle,
    /// Driving toward open (position and tilt decreasing).
    Opening,
    /// Driving toward closed (position and tilt increasing).
    Closing,
}

impl MotionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Opening => "opening",
            Self::Closing => "closing",
        }
    }
}

impl std::fmt::Display for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time estimate of the cover, in public units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverSnapshot {
    /// Vertical position fraction: 0 = fully open, 1 = fully closed.
    pub position: f32,
    /// Slat tilt fraction: 0 = flat, 1 = fully tilted.
    pub tilt: f32,
    pub state: MotionState,
}
