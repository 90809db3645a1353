//! Construction and validation for [`CoverCore`].

use std::sync::Arc;

use blinds_traits::{Actuator, Clock, MonotonicClock, StateSink};

use crate::config::{ButtonCfg, DriveCfg};
use crate::core::CoverCore;
use crate::error::{BuildError, Result};
use crate::state::CoverState;

/// Hard cap on any configured duration: 24 hours in ms. Keeps all the signed
/// clamp arithmetic comfortably inside i32/i64.
const MAX_DURATION_MS: u32 = 86_400_000;

/// Boxed (dynamically dispatched) cover, as produced by [`CoverBuilder`].
pub type Cover = CoverCore<Box<dyn Actuator>, Box<dyn StateSink>>;

/// Builder for a boxed [`Cover`]. All fields are validated on `try_build`.
#[derive(Default)]
pub struct CoverBuilder {
    actuator: Option<Box<dyn Actuator>>,
    sink: Option<Box<dyn StateSink>>,
    clock: Option<Box<dyn Clock + Send + Sync>>,
    drive: Option<DriveCfg>,
    buttons: Option<ButtonCfg>,
    restored: Option<(f32, f32)>,
}

impl CoverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actuator(mut self, actuator: impl Actuator + 'static) -> Self {
        self.actuator = Some(Box::new(actuator));
        self
    }

    pub fn with_state_sink(mut self, sink: impl StateSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Provide a custom clock; defaults to `MonotonicClock` when not set.
    pub fn with_clock(mut self, clock: Box<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_drive(mut self, drive: DriveCfg) -> Self {
        self.drive = Some(drive);
        self
    }

    pub fn with_buttons(mut self, buttons: ButtonCfg) -> Self {
        self.buttons = Some(buttons);
        self
    }

    /// Seed the estimate from persisted state (fractions in [0, 1]).
    pub fn with_restored_state(mut self, position: f32, tilt: f32) -> Self {
        self.restored = Some((position, tilt));
        self
    }

    pub fn try_build(self) -> Result<Cover> {
        let actuator = self
            .actuator
            .ok_or_else(|| eyre::Report::new(BuildError::MissingActuator))?;
        let sink = self
            .sink
            .ok_or_else(|| eyre::Report::new(BuildError::MissingStateSink))?;
        build_cover(
            actuator,
            sink,
            self.drive.unwrap_or_default(),
            self.buttons.unwrap_or_default(),
            self.restored,
            self.clock,
        )
    }
}

/// Build a statically-dispatched [`CoverCore`] from concrete collaborators.
pub fn build_cover<A, S>(
    actuator: A,
    sink: S,
    drive: DriveCfg,
    buttons: ButtonCfg,
    restored: Option<(f32, f32)>,
    clock: Option<Box<dyn Clock + Send + Sync>>,
) -> Result<CoverCore<A, S>>
where
    A: Actuator + 'static,
    S: StateSink + 'static,
{
    validate(&drive, &buttons)?;

    let clock: Arc<dyn Clock + Send + Sync> = match clock {
        Some(b) => Arc::from(b),
        None => Arc::new(MonotonicClock::new()),
    };
    let epoch = clock.now();

    let close_dur_ms = drive.close_duration_ms as i32;
    let open_dur_ms = drive.open_duration_ms as i32;
    let tilt_dur_ms = drive.tilt_duration_ms as i32;
    let warmup_ms = drive.motor_warmup_delay_ms as i32;

    let mut state = CoverState::default();
    if let Some((position, tilt)) = restored {
        let p = if position.is_finite() {
            position.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let t = if tilt.is_finite() {
            tilt.clamp(0.0, 1.0)
        } else {
            0.0
        };
        state.exact_pos = (p * close_dur_ms as f32).round() as i32;
        state.exact_tilt = (t * tilt_dur_ms as f32).round() as i32;
        tracing::debug!(position = p, tilt = t, "restored cover state");
    }

    Ok(CoverCore {
        actuator,
        sink,
        clock,
        epoch,
        buttons,
        assumed_state: drive.assumed_state,
        close_dur_ms,
        open_dur_ms,
        tilt_dur_ms,
        warmup_ms,
        state,
    })
}

fn validate(drive: &DriveCfg, buttons: &ButtonCfg) -> Result<()> {
    if drive.close_duration_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "close_duration_ms must be > 0",
        )));
    }
    if drive.open_duration_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "open_duration_ms must be > 0",
        )));
    }
    if drive.tilt_duration_ms == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "tilt_duration_ms must be > 0",
        )));
    }
    if drive.close_duration_ms > MAX_DURATION_MS
        || drive.open_duration_ms > MAX_DURATION_MS
        || drive.tilt_duration_ms > MAX_DURATION_MS
    {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "axis durations must not exceed 24 hours",
        )));
    }
    if drive.motor_warmup_delay_ms >= drive.close_duration_ms {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "motor_warmup_delay_ms must be shorter than close_duration_ms",
        )));
    }
    if buttons.hold_step_pct == 0 || buttons.hold_step_pct > 100 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "hold_step_pct must be in 1..=100",
        )));
    }
    if buttons.open_limit_pct >= 100 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "open_limit_pct must be < 100",
        )));
    }
    Ok(())
}
