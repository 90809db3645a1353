//! Runtime configuration for the motion engine.
//!
//! These are the structs consumed by `CoverCore`. They are separate from the
//! TOML-deserialized schema in `blinds_config`; see `conversions` for the
//! mapping.

/// Travel timing and motor behavior.
#[derive(Debug, Clone)]
pub struct DriveCfg {
    /// Time for a full open traversal (fully closed to fully open), in ms.
    pub open_duration_ms: u32,
    /// Time for a full close traversal (fully open to fully closed), in ms.
    /// Also the unit scale of the internal position estimate.
    pub close_duration_ms: u32,
    /// Time for a full tilt sweep (flat to fully tilted), in ms.
    pub tilt_duration_ms: u32,
    /// Settle delay after the motor starts or changes direction, before the
    /// time-based estimate is trusted, in ms.
    pub motor_warmup_delay_ms: u32,
    /// Whether the reported state is an assumption (no feedback sensing).
    /// Surfaced to host frameworks; does not affect the motion model.
    pub assumed_state: bool,
}

impl Default for DriveCfg {
    fn default() -> Self {
        Self {
            open_duration_ms: 20_000,
            close_duration_ms: 20_000,
            tilt_duration_ms: 5_000,
            motor_warmup_delay_ms: 20,
            assumed_state: false,
        }
    }
}

/// Button gesture tuning.
#[derive(Debug, Clone)]
pub struct ButtonCfg {
    /// Tilt percentage added/removed per hold micro-step.
    pub hold_step_pct: u8,
    /// Window between hold micro-steps, measured from each step's start, ms.
    pub hold_repeat_wait_ms: u32,
    /// Settle delay before a deferred tilt starts after the position move
    /// that carried it reaches rest, ms.
    pub deferred_tilt_settle_ms: u32,
    /// How far "up" gestures may open, as a position percentage (0 = fully
    /// open). A larger value restricts the open range of button gestures.
    pub open_limit_pct: u8,
}

impl Default for ButtonCfg {
    fn default() -> Self {
        Self {
            hold_step_pct: 9,
            hold_repeat_wait_ms: 600,
            deferred_tilt_settle_ms: 400,
            open_limit_pct: 0,
        }
    }
}
