//! Mappings from the TOML schema (`blinds_config`) to runtime config.

use crate::config::{ButtonCfg, DriveCfg};

impl From<&blinds_config::Drive> for DriveCfg {
    fn from(d: &blinds_config::Drive) -> Self {
        Self {
            open_duration_ms: d.open_duration_ms,
            close_duration_ms: d.close_duration_ms,
            tilt_duration_ms: d.tilt_duration_ms,
            motor_warmup_delay_ms: d.motor_warmup_delay_ms,
            assumed_state: d.assumed_state,
        }
    }
}

impl From<&blinds_config::Buttons> for ButtonCfg {
    fn from(b: &blinds_config::Buttons) -> Self {
        Self {
            hold_step_pct: b.hold_step_pct,
            hold_repeat_wait_ms: b.hold_repeat_wait_ms,
            deferred_tilt_settle_ms: b.deferred_tilt_settle_ms,
            open_limit_pct: b.open_limit_pct,
        }
    }
}
