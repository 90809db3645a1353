use blinds_core::mocks::{RecordingActuator, RecordingSink};
use blinds_core::{ButtonCfg, CoverBuilder, DriveCfg};
use rstest::rstest;

#[test]
fn missing_actuator_is_reported() {
    let err = CoverBuilder::new()
        .with_state_sink(RecordingSink::new())
        .try_build()
        .expect_err("build must fail without an actuator");
    assert!(format!("{err}").contains("missing actuator"), "{err}");
}

#[test]
fn missing_state_sink_is_reported() {
    let err = CoverBuilder::new()
        .with_actuator(RecordingActuator::new())
        .try_build()
        .expect_err("build must fail without a state sink");
    assert!(format!("{err}").contains("missing state sink"), "{err}");
}

#[rstest]
#[case(
    DriveCfg { close_duration_ms: 0, ..DriveCfg::default() },
    "close_duration_ms"
)]
#[case(
    DriveCfg { open_duration_ms: 0, ..DriveCfg::default() },
    "open_duration_ms"
)]
#[case(
    DriveCfg { tilt_duration_ms: 0, ..DriveCfg::default() },
    "tilt_duration_ms"
)]
#[case(
    DriveCfg { close_duration_ms: 90_000_000, ..DriveCfg::default() },
    "24 hours"
)]
#[case(
    DriveCfg { motor_warmup_delay_ms: 20_000, ..DriveCfg::default() },
    "motor_warmup_delay_ms"
)]
fn invalid_drive_config_is_rejected(#[case] drive: DriveCfg, #[case] needle: &str) {
    let err = CoverBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_state_sink(RecordingSink::new())
        .with_drive(drive)
        .try_build()
        .expect_err("build must reject invalid drive config");
    assert!(format!("{err}").contains(needle), "{err}");
}

#[rstest]
#[case(ButtonCfg { hold_step_pct: 0, ..ButtonCfg::default() }, "hold_step_pct")]
#[case(ButtonCfg { hold_step_pct: 101, ..ButtonCfg::default() }, "hold_step_pct")]
#[case(ButtonCfg { open_limit_pct: 100, ..ButtonCfg::default() }, "open_limit_pct")]
fn invalid_button_config_is_rejected(#[case] buttons: ButtonCfg, #[case] needle: &str) {
    let err = CoverBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_state_sink(RecordingSink::new())
        .with_buttons(buttons)
        .try_build()
        .expect_err("build must reject invalid button config");
    assert!(format!("{err}").contains(needle), "{err}");
}

#[test]
fn restored_state_is_clamped_into_range() {
    let cover = CoverBuilder::new()
        .with_actuator(RecordingActuator::new())
        .with_state_sink(RecordingSink::new())
        .with_restored_state(1.7, -0.3)
        .try_build()
        .expect("build cover");
    assert_eq!(cover.position(), 1.0);
    assert_eq!(cover.tilt(), 0.0);
}
