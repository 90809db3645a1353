//! Button gesture behavior against the running engine. Pure resolution rules
//! are covered by unit tests in the `button` module; these exercise the full
//! request/tick path.

use blinds_core::mocks::{ManualClock, RecordingActuator, RecordingSink, Trigger};
use blinds_core::{
    ButtonCfg, ButtonKind, CoverCore, DriveCfg, MotionState, PressMode, build_cover,
};

const TICK_MS: u64 = 10;

fn harness(
    restored: Option<(f32, f32)>,
) -> (
    CoverCore<RecordingActuator, RecordingSink>,
    RecordingActuator,
    RecordingSink,
    ManualClock,
) {
    let actuator = RecordingActuator::new();
    let sink = RecordingSink::new();
    let clock = ManualClock::new();
    let drive = DriveCfg {
        open_duration_ms: 20_000,
        close_duration_ms: 20_000,
        tilt_duration_ms: 5_000,
        motor_warmup_delay_ms: 100,
        assumed_state: false,
    };
    let cover = build_cover(
        actuator.clone(),
        sink.clone(),
        drive,
        ButtonCfg::default(),
        restored,
        Some(Box::new(clock.clone())),
    )
    .expect("build cover");
    (cover, actuator, sink, clock)
}

fn settle(
    cover: &mut CoverCore<RecordingActuator, RecordingSink>,
    clock: &ManualClock,
    max_ms: u64,
) {
    let mut elapsed = 0;
    while !cover.is_settled() {
        cover.tick();
        clock.advance_ms(TICK_MS);
        elapsed += TICK_MS;
        assert!(elapsed <= max_ms, "did not settle within {max_ms}ms");
    }
}

fn run_for(cover: &mut CoverCore<RecordingActuator, RecordingSink>, clock: &ManualClock, ms: u64) {
    for _ in 0..(ms / TICK_MS) {
        cover.tick();
        clock.advance_ms(TICK_MS);
    }
}

#[test]
fn up_single_stops_an_opening_move() {
    let (mut cover, actuator, _sink, clock) = harness(Some((1.0, 0.0)));

    cover.request_position(0.0);
    run_for(&mut cover, &clock, 2_000);
    assert_eq!(cover.action(), MotionState::Opening);

    cover.on_button(ButtonKind::Up, PressMode::Single);

    assert_eq!(cover.action(), MotionState::Idle);
    assert!(cover.is_settled());
    assert_eq!(actuator.last(), Some(Trigger::Stop));
}

#[test]
fn up_single_from_closed_opens_to_the_limit() {
    let (mut cover, actuator, _sink, clock) = harness(Some((1.0, 0.0)));

    cover.on_button(ButtonKind::Up, PressMode::Single);
    settle(&mut cover, &clock, 30_000);

    assert_eq!(cover.position_ms(), 0);
    assert_eq!(cover.tilt_ms(), 0);
    assert_eq!(actuator.triggers(), vec![Trigger::Open, Trigger::Stop]);
}

#[test]
fn up_single_at_open_limit_is_a_noop() {
    let (mut cover, actuator, _sink, _clock) = harness(None);

    cover.on_button(ButtonKind::Up, PressMode::Single);

    assert!(cover.is_settled());
    assert!(actuator.triggers().is_empty());
}

#[test]
fn up_single_nearly_open_and_tilted_goes_flat_and_open() {
    let (mut cover, _actuator, _sink, clock) = harness(Some((0.02, 0.4)));

    cover.on_button(ButtonKind::Up, PressMode::Single);
    settle(&mut cover, &clock, 10_000);

    assert_eq!(cover.position_ms(), 0);
    assert_eq!(cover.tilt_ms(), 0);
}

#[test]
fn down_single_from_open_closes_fully_tilted() {
    let (mut cover, _actuator, _sink, clock) = harness(None);

    cover.on_button(ButtonKind::Down, PressMode::Single);
    settle(&mut cover, &clock, 30_000);

    assert_eq!(cover.position_ms(), 20_000);
    assert_eq!(cover.tilt_ms(), 5_000);
}

#[test]
fn down_single_stops_a_closing_move() {
    let (mut cover, _actuator, _sink, clock) = harness(None);

    cover.on_button(ButtonKind::Down, PressMode::Single);
    run_for(&mut cover, &clock, 2_000);
    assert_eq!(cover.action(), MotionState::Closing);

    cover.on_button(ButtonKind::Down, PressMode::Single);
    assert_eq!(cover.action(), MotionState::Idle);
    assert!(cover.is_settled());
}

#[test]
fn down_double_closes_with_flat_slats() {
    let (mut cover, _actuator, _sink, clock) = harness(Some((0.5, 0.5)));

    cover.on_button(ButtonKind::Down, PressMode::Double);
    settle(&mut cover, &clock, 30_000);

    assert_eq!(cover.tilt_ms(), 0);
    // flattening the slats after the full close raises the blind by the
    // tilt sweep (single-motor coupling)
    assert_eq!(cover.position_ms(), 15_000);
}

#[test]
fn hold_steps_tilt_down_to_zero_then_auto_clears() {
    let (mut cover, _actuator, sink, clock) = harness(Some((1.0, 1.0)));

    cover.on_button(ButtonKind::Up, PressMode::Hold);
    settle(&mut cover, &clock, 30_000);

    // ran all the way to flat and released itself at the travel limit
    assert_eq!(cover.tilt_ms(), 0);
    assert!(cover.position() < 1.0);

    // published tilt never increases while the hold walks toward flat
    let states = sink.states();
    assert!(states.len() >= 2);
    for pair in states.windows(2) {
        assert!(pair[1].1 <= pair[0].1, "tilt increased during an up-hold");
    }
}

#[test]
fn hold_at_travel_limit_clears_immediately() {
    let (mut cover, actuator, _sink, _clock) = harness(Some((1.0, 1.0)));

    // already fully tilted: a down-hold saturates on its first step
    cover.on_button(ButtonKind::Down, PressMode::Hold);

    assert!(cover.is_settled());
    assert!(actuator.triggers().is_empty());
}

#[test]
fn release_ends_an_active_hold() {
    let (mut cover, _actuator, _sink, clock) = harness(Some((1.0, 1.0)));

    cover.on_button(ButtonKind::Up, PressMode::Hold);
    run_for(&mut cover, &clock, 2_500);

    cover.on_button(ButtonKind::Up, PressMode::Release);
    settle(&mut cover, &clock, 10_000);

    let tilt = cover.tilt();
    assert!(
        tilt > 0.0 && tilt < 1.0,
        "hold released mid-travel, tilt {tilt}"
    );
}

#[test]
fn hold_micro_steps_pause_between_iterations() {
    let (mut cover, actuator, _sink, clock) = harness(Some((1.0, 1.0)));

    cover.on_button(ButtonKind::Up, PressMode::Hold);
    // one micro-step is 9% of the tilt sweep (450ms) plus warmup; by 700ms
    // the first step has finished and the repeat window is still pending
    run_for(&mut cover, &clock, 700);

    let triggers = actuator.triggers();
    assert_eq!(triggers, vec![Trigger::Open, Trigger::Stop]);
    let after_first = cover.tilt_ms();
    assert_eq!(after_first, 4_550);

    // the second step only lands after the 600ms repeat window
    settle(&mut cover, &clock, 30_000);
    assert_eq!(cover.tilt_ms(), 0);
}
