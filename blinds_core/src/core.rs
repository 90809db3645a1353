//! The motion engine (`CoverCore`).
//!
//! Contains the per-tick state machine that estimates both axes from elapsed
//! motor-on time: target resolution, direction selection with warmup,
//! deferred-tilt sequencing, button-hold repetition, and calibration.

use std::sync::Arc;
use std::time::Instant;

use blinds_traits::{Actuator, Clock, StateSink};

use crate::button::{self, ButtonKind, Gesture, GestureContext, PressMode};
use crate::config::ButtonCfg;
use crate::request::CoverRequest;
use crate::state::CoverState;
use crate::status::{CoverSnapshot, MotionState};

/// Publish every this many motion ticks while a move is in flight.
const PUBLISH_EVERY_N_TICKS: u32 = 100;
/// Bias applied to the position estimate before a calibration traversal, ms.
const CALIBRATION_BIAS_MS: i32 = 1000;

/// Motion engine for one cover. Single-threaded; advanced by [`tick`].
///
/// [`tick`]: CoverCore::tick
pub struct CoverCore<A: Actuator, S: StateSink> {
    pub(crate) actuator: A,
    pub(crate) sink: S,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    pub(crate) epoch: Instant,
    pub(crate) buttons: ButtonCfg,
    pub(crate) assumed_state: bool,
    // Axis scales cached as signed ms for the clamp arithmetic
    pub(crate) close_dur_ms: i32,
    pub(crate) open_dur_ms: i32,
    pub(crate) tilt_dur_ms: i32,
    pub(crate) warmup_ms: i32,
    pub(crate) state: CoverState,
}

impl<A: Actuator, S: StateSink> std::fmt::Debug for CoverCore<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverCore")
            .field("position", &self.position())
            .field("tilt", &self.tilt())
            .field("state", &self.state.current_action)
            .finish()
    }
}

impl<A: Actuator, S: StateSink> CoverCore<A, S> {
    // ── Command intake ───────────────────────────────────────────────────────

    /// Apply one decoded request. A tilt combined with a position is captured
    /// in the deferred tilt queue and applied once the position move reaches
    /// rest; a tilt alone supersedes any pending deferred tilt.
    pub fn apply(&mut self, request: CoverRequest) {
        if request.stop {
            self.request_stop();
            return;
        }
        let position = request.position.filter(|p| p.is_finite());
        let tilt = request.tilt.filter(|t| t.is_finite());
        match (position, tilt) {
            (Some(p), Some(t)) => {
                self.state.deferred_tilt.set(t.clamp(0.0, 1.0));
                self.request_position(p);
            }
            (Some(p), None) => self.request_position(p),
            (None, Some(t)) => {
                self.state.deferred_tilt.clear();
                self.request_tilt(t);
            }
            (None, None) => {}
        }
    }

    /// Retarget the position axis. Does not actuate; the tick loop does.
    ///
    /// Tilt motion is suppressed for the duration of the move (its deltas are
    /// zeroed); a zero-delta request settles immediately and hands any
    /// deferred tilt to the queue.
    pub fn request_position(&mut self, position: f32) {
        if !position.is_finite() {
            return;
        }
        let new_pos = (position.clamp(0.0, 1.0) * self.close_dur_ms as f32).round() as i32;
        self.state.starting_pos = self.state.exact_pos;
        self.state.starting_tilt = self.state.exact_tilt;
        self.state.change_pos = new_pos - self.state.exact_pos;
        self.state.rest_pos = self.state.change_pos;
        self.state.change_tilt = 0;
        self.state.rest_tilt = 0;
        self.begin_move_window();
        tracing::debug!(position, rest_ms = self.state.rest_pos, "position request");
        if self.state.rest_pos == 0 {
            self.settle_idle();
            self.process_deferred_tilt();
        }
    }

    /// Retarget the tilt axis. A tilt-only move never also moves position.
    pub fn request_tilt(&mut self, tilt: f32) {
        if !tilt.is_finite() {
            return;
        }
        let new_tilt = (tilt.clamp(0.0, 1.0) * self.tilt_dur_ms as f32).round() as i32;
        self.state.starting_pos = self.state.exact_pos;
        self.state.starting_tilt = self.state.exact_tilt;
        self.state.change_tilt = new_tilt - self.state.exact_tilt;
        self.state.rest_tilt = self.state.change_tilt;
        self.state.change_pos = 0;
        self.state.rest_pos = 0;
        self.begin_move_window();
        tracing::debug!(tilt, rest_ms = self.state.rest_tilt, "tilt request");
        if self.state.rest_tilt == 0 {
            self.settle_idle();
        }
    }

    /// Cancel any in-flight move and hold gesture, stop the motor, publish.
    pub fn request_stop(&mut self) {
        self.state.rest_pos = 0;
        self.state.rest_tilt = 0;
        self.state.change_pos = 0;
        self.state.change_tilt = 0;
        self.state.button_holding_direction = 0;
        if let Err(e) = self.actuator.stop() {
            tracing::warn!(error = %e, "stop trigger failed");
        }
        self.state.current_action = MotionState::Idle;
        self.state.deferred_tilt.clear();
        self.publish_state();
    }

    // ── Motion engine tick ───────────────────────────────────────────────────

    /// Advance the state machine once. Never blocks: during a warmup/settle
    /// window this returns immediately, and the caller is expected to tick
    /// again on the next scheduler pass.
    pub fn tick(&mut self) {
        if self.state.wait_time > 0 {
            if i64::from(self.state.wait_time) > self.elapsed_ms() {
                return;
            }
            self.state.wait_time = 0;
            self.state.starting_time = self.now_ms();
            if self.process_held_button(false) {
                return;
            }
        }

        if self.state.rest_pos > 0 || self.state.rest_tilt > 0 {
            self.advance(MotionState::Closing);
        } else if self.state.rest_pos < 0 || self.state.rest_tilt < 0 {
            self.advance(MotionState::Opening);
        }
    }

    fn advance(&mut self, direction: MotionState) {
        if self.state.current_action != direction {
            let fired = match direction {
                MotionState::Closing => self.actuator.drive_close(),
                MotionState::Opening => self.actuator.drive_open(),
                MotionState::Idle => return,
            };
            if let Err(e) = fired {
                tracing::warn!(error = %e, ?direction, "drive trigger failed");
            }
            tracing::debug!(?direction, warmup_ms = self.warmup_ms, "direction change");
            self.state.current_action = direction;
            self.state.wait_time = self.warmup_ms;
            return;
        }

        // Both axes advance at unit time-rate while the motor runs, clamped
        // independently; whichever reaches its target first stops changing.
        let dt = self.elapsed_clamped();
        let dt_pos = self.position_elapsed(direction, dt);
        self.state.publishing_delay = self.state.publishing_delay.wrapping_add(1);

        let complete = match direction {
            MotionState::Closing => {
                self.state.rest_tilt = (self.state.change_tilt - dt).clamp(0, self.tilt_dur_ms);
                self.state.exact_tilt = (self.state.starting_tilt + dt).clamp(0, self.tilt_dur_ms);
                self.state.rest_pos = (self.state.change_pos - dt_pos).clamp(0, self.close_dur_ms);
                self.state.exact_pos = (self.state.starting_pos + dt_pos).clamp(0, self.close_dur_ms);
                self.state.rest_pos <= 0 && self.state.rest_tilt <= 0
            }
            MotionState::Opening => {
                self.state.rest_tilt = (self.state.change_tilt + dt).clamp(-self.tilt_dur_ms, 0);
                self.state.exact_tilt = (self.state.starting_tilt - dt).clamp(0, self.tilt_dur_ms);
                self.state.rest_pos = (self.state.change_pos + dt_pos).clamp(-self.close_dur_ms, 0);
                self.state.exact_pos = (self.state.starting_pos - dt_pos).clamp(0, self.close_dur_ms);
                self.state.rest_pos >= 0 && self.state.rest_tilt >= 0
            }
            MotionState::Idle => false,
        };

        if complete {
            self.finish_move();
        } else if self.state.publishing_delay % PUBLISH_EVERY_N_TICKS == 0 {
            self.publish_state();
        }
    }

    fn finish_move(&mut self) {
        if let Err(e) = self.actuator.stop() {
            tracing::warn!(error = %e, "stop trigger failed on completion");
        }
        self.state.current_action = MotionState::Idle;
        tracing::debug!(
            position = self.position(),
            tilt = self.tilt(),
            "move complete"
        );
        self.publish_state();
        if !self.process_held_button(true) {
            self.process_deferred_tilt();
        }
    }

    // ── Deferred tilt queue ──────────────────────────────────────────────────

    /// Consume the pending tilt, if any, arming the direction-change settle
    /// window before the tilt move starts.
    fn process_deferred_tilt(&mut self) {
        if let Some(tilt) = self.state.deferred_tilt.take() {
            tracing::debug!(tilt, "applying deferred tilt");
            self.state.wait_time = self.buttons.deferred_tilt_settle_ms as i32;
            self.request_tilt(tilt);
        }
    }

    // ── Button gestures ──────────────────────────────────────────────────────

    /// Feed one physical button event through the gesture interpreter.
    pub fn on_button(&mut self, kind: ButtonKind, press: PressMode) {
        let ctx = GestureContext {
            pos_pct: self.position_pct(),
            tilt_pct: self.tilt_pct(),
            action: self.state.current_action,
            open_limit_pct: i32::from(self.buttons.open_limit_pct),
        };
        let gesture = button::resolve(kind, press, &ctx);
        tracing::debug!(?kind, ?press, ?gesture, "button event");
        // a fresh button event always supersedes a stale deferred tilt
        self.state.deferred_tilt.clear();
        match gesture {
            Gesture::None => {}
            Gesture::Stop => self.request_stop(),
            Gesture::MoveTo { pos_pct, tilt_pct } => {
                if let Some(t) = tilt_pct {
                    self.state.deferred_tilt.set(t as f32 / 100.0);
                }
                self.request_position(pos_pct as f32 / 100.0);
            }
            Gesture::BeginHold { direction } => {
                self.state.button_holding_direction = direction;
                self.process_held_button(false);
            }
            Gesture::EndHold => self.state.button_holding_direction = 0,
        }
    }

    /// Continue an active hold gesture. Returns whether a hold was active so
    /// the tick loop can skip the deferred-tilt check while a hold is driving.
    ///
    /// `just_finished` is set when called from move completion: the next
    /// micro-step is then armed behind the repeat window instead of issued
    /// immediately, letting the motor settle.
    fn process_held_button(&mut self, just_finished: bool) -> bool {
        if self.state.button_holding_direction == 0 {
            return false;
        }
        if just_finished {
            self.state.wait_time = self.buttons.hold_repeat_wait_ms as i32;
            return true;
        }
        let tilt_pct = self.tilt_pct();
        let step = i32::from(self.state.button_holding_direction) * i32::from(self.buttons.hold_step_pct);
        let requested = (tilt_pct + step).clamp(0, 100);
        if requested == tilt_pct {
            // saturated at a travel limit
            self.state.button_holding_direction = 0;
        } else {
            tracing::debug!(requested, "hold step");
            self.state.deferred_tilt.clear();
            self.request_tilt(requested as f32 / 100.0);
        }
        true
    }

    // ── Calibration ──────────────────────────────────────────────────────────

    /// Re-anchor the time-based estimate against a mechanical extreme by
    /// biasing the estimate outside its clamp range and traversing the full
    /// axis; per-tick clamping pulls the estimate back in range while the
    /// biased delta guarantees the motor reaches the stop.
    pub fn start_calibration(&mut self) {
        let pos_pct = self.position_pct();
        if pos_pct <= 10 {
            tracing::info!(pos_pct, "calibration: full close traversal");
            self.state.exact_pos = -CALIBRATION_BIAS_MS;
            self.request_position(1.0);
        } else {
            tracing::info!(pos_pct, "calibration: full open traversal");
            self.state.exact_pos = self.close_dur_ms + CALIBRATION_BIAS_MS;
            self.request_position(0.0);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// Current position fraction: 0 = fully open, 1 = fully closed.
    pub fn position(&self) -> f32 {
        (self.state.exact_pos as f32 / self.close_dur_ms as f32).clamp(0.0, 1.0)
    }

    /// Current tilt fraction: 0 = flat, 1 = fully tilted.
    pub fn tilt(&self) -> f32 {
        (self.state.exact_tilt as f32 / self.tilt_dur_ms as f32).clamp(0.0, 1.0)
    }

    /// Raw position estimate in close-traversal milliseconds.
    pub fn position_ms(&self) -> i32 {
        self.state.exact_pos
    }

    /// Raw tilt estimate in tilt-sweep milliseconds.
    pub fn tilt_ms(&self) -> i32 {
        self.state.exact_tilt
    }

    pub fn action(&self) -> MotionState {
        self.state.current_action
    }

    /// Whether the reported state is an assumption (no feedback sensing).
    pub fn assumed_state(&self) -> bool {
        self.assumed_state
    }

    pub fn snapshot(&self) -> CoverSnapshot {
        CoverSnapshot {
            position: self.position(),
            tilt: self.tilt(),
            state: self.state.current_action,
        }
    }

    /// True when nothing remains to drive: at rest, no deferred tilt, no
    /// active hold gesture.
    pub fn is_settled(&self) -> bool {
        self.state.current_action == MotionState::Idle
            && self.state.rest_pos == 0
            && self.state.rest_tilt == 0
            && !self.state.deferred_tilt.is_pending()
            && self.state.button_holding_direction == 0
    }

    // ── Private helpers ──────────────────────────────────────────────────────

    fn begin_move_window(&mut self) {
        self.state.starting_time = self.now_ms();
        self.state.publishing_delay = 0;
    }

    /// Stop and return to rest when a request resolved to a zero delta while
    /// a move was still in flight; keeps `Idle ⇔ rests == 0` intact.
    fn settle_idle(&mut self) {
        if self.state.current_action != MotionState::Idle {
            if let Err(e) = self.actuator.stop() {
                tracing::warn!(error = %e, "stop trigger failed");
            }
            self.state.current_action = MotionState::Idle;
            self.publish_state();
        }
    }

    fn publish_state(&mut self) {
        let position = self.position();
        let tilt = self.tilt();
        tracing::debug!(position, tilt, "publish state");
        self.sink.publish(position, tilt);
    }

    fn now_ms(&self) -> i64 {
        self.clock.ms_since(self.epoch) as i64
    }

    /// Elapsed ms since the current move window started. The single accessor
    /// both branches share; wall-clock based, so skipped ticks self-correct.
    fn elapsed_ms(&self) -> i64 {
        (self.now_ms() - self.state.starting_time).max(0)
    }

    fn elapsed_clamped(&self) -> i32 {
        self.elapsed_ms().min(i64::from(i32::MAX)) as i32
    }

    /// Position-axis elapsed time. Opening is rescaled when the configured
    /// open traversal differs from the close traversal (the position estimate
    /// counts close-traversal ms); the tilt axis always uses raw elapsed time.
    fn position_elapsed(&self, direction: MotionState, dt: i32) -> i32 {
        if direction == MotionState::Opening && self.open_dur_ms != self.close_dur_ms {
            let scaled = i64::from(dt) * i64::from(self.close_dur_ms) / i64::from(self.open_dur_ms);
            scaled.min(i64::from(i32::MAX)) as i32
        } else {
            dt
        }
    }

    fn position_pct(&self) -> i32 {
        (i64::from(self.state.exact_pos) * 100 / i64::from(self.close_dur_ms)) as i32
    }

    fn tilt_pct(&self) -> i32 {
        (i64::from(self.state.exact_tilt) * 100 / i64::from(self.tilt_dur_ms)) as i32
    }
}
