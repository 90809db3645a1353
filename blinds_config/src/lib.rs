#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and persisted state for the blind controller.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - `PersistedState` is the last known position/tilt, written to a small
//!   TOML state file by the host and restored at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Travel timing and motor behavior.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Drive {
    /// Full open traversal time (fully closed to fully open), ms.
    pub open_duration_ms: u32,
    /// Full close traversal time (fully open to fully closed), ms.
    pub close_duration_ms: u32,
    /// Full tilt sweep time (flat to fully tilted), ms.
    pub tilt_duration_ms: u32,
    /// Motor settle delay after a start or direction change, ms.
    pub motor_warmup_delay_ms: u32,
    /// Report the state as assumed (no feedback sensing).
    pub assumed_state: bool,
}

impl Default for Drive {
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
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Buttons {
    /// Tilt percentage per hold micro-step.
    pub hold_step_pct: u8,
    /// Window between hold micro-steps, measured from each step's start, ms.
    pub hold_repeat_wait_ms: u32,
    /// Settle delay before a deferred tilt starts, ms.
    pub deferred_tilt_settle_ms: u32,
    /// How far "up" gestures may open, as a position percentage (0 = fully
    /// open).
    pub open_limit_pct: u8,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            hold_step_pct: 9,
            hold_repeat_wait_ms: 600,
            deferred_tilt_settle_ms: 400,
            open_limit_pct: 0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub drive: Drive,
    pub buttons: Buttons,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    /// Validate the parsed configuration; mirrors the constraints the core
    /// builder enforces so bad values fail at load time with a clear message.
    pub fn validate(&self) -> eyre::Result<()> {
        const MAX_DURATION_MS: u32 = 86_400_000;

        if self.drive.close_duration_ms == 0 {
            eyre::bail!("drive.close_duration_ms must be > 0");
        }
        if self.drive.open_duration_ms == 0 {
            eyre::bail!("drive.open_duration_ms must be > 0");
        }
        if self.drive.tilt_duration_ms == 0 {
            eyre::bail!("drive.tilt_duration_ms must be > 0");
        }
        if self.drive.close_duration_ms > MAX_DURATION_MS
            || self.drive.open_duration_ms > MAX_DURATION_MS
            || self.drive.tilt_duration_ms > MAX_DURATION_MS
        {
            eyre::bail!("drive durations must not exceed 24 hours");
        }
        if self.drive.motor_warmup_delay_ms >= self.drive.close_duration_ms {
            eyre::bail!("drive.motor_warmup_delay_ms must be shorter than drive.close_duration_ms");
        }
        if self.buttons.hold_step_pct == 0 || self.buttons.hold_step_pct > 100 {
            eyre::bail!("buttons.hold_step_pct must be in 1..=100");
        }
        if self.buttons.open_limit_pct >= 100 {
            eyre::bail!("buttons.open_limit_pct must be < 100");
        }
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }
        Ok(())
    }
}

/// Last known cover state, restored at startup and written back after runs.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct PersistedState {
    /// Position fraction in [0, 1]; 0 = fully open.
    pub position: f32,
    /// Tilt fraction in [0, 1]; 0 = flat.
    pub tilt: f32,
}

impl PersistedState {
    /// Load from a TOML state file; `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> eyre::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("reading state file {}: {e}", path.display()))?;
        let state: Self = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("parsing state file {}: {e}", path.display()))?;
        Ok(Some(state.clamped()))
    }

    /// Write to a TOML state file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| eyre::eyre!("creating {}: {e}", parent.display()))?;
        }
        let content = toml::to_string(&self.clamped())
            .map_err(|e| eyre::eyre!("serializing state: {e}"))?;
        std::fs::write(path, content)
            .map_err(|e| eyre::eyre!("writing state file {}: {e}", path.display()))?;
        Ok(())
    }

    /// Clamp both fractions into [0, 1]; non-finite values become 0.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            position: clamp(self.position),
            tilt: clamp(self.tilt),
        }
    }
}
