//! Mutable cover state owned by the motion engine.

use crate::status::MotionState;

/// At most one pending tilt target, captured while a position move is in
/// flight and applied once that move reaches rest.
///
/// `take` reads and clears in one operation so a consumed value can never be
/// applied twice; `set` overwrites any pending value (last request wins).
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredTilt(Option<f32>);

impl DeferredTilt {
    pub fn set(&mut self, tilt: f32) {
        self.0 = Some(tilt);
    }

    pub fn take(&mut self) -> Option<f32> {
        self.0.take()
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}

/// Time-based estimate and in-flight move bookkeeping for one cover.
///
/// All `*_pos` fields are in close-traversal milliseconds (0 = fully open,
/// `close_duration` = fully closed); all `*_tilt` fields are in tilt-sweep
/// milliseconds (0 = flat, `tilt_duration` = fully tilted). The `rest_*` and
/// `change_*` fields are signed remaining/original deltas to the target:
/// positive drives toward close, negative toward open.
#[derive(Debug, Default)]
pub struct CoverState {
    pub(crate) exact_pos: i32,
    pub(crate) exact_tilt: i32,
    pub(crate) starting_pos: i32,
    pub(crate) starting_tilt: i32,
    /// Move-start timestamp, ms since the engine epoch.
    pub(crate) starting_time: i64,
    pub(crate) rest_pos: i32,
    pub(crate) rest_tilt: i32,
    pub(crate) change_pos: i32,
    pub(crate) change_tilt: i32,
    pub(crate) current_action: MotionState,
    /// Remaining warmup/settle delay before motion is trusted, ms.
    pub(crate) wait_time: i32,
    /// Tick counter gating periodic publication during long moves.
    pub(crate) publishing_delay: u32,
    pub(crate) deferred_tilt: DeferredTilt,
    /// -1 while an "up" hold gesture repeats, +1 for "down", 0 otherwise.
    pub(crate) button_holding_direction: i8,
}
