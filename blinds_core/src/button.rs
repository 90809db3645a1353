//! Physical push-button gesture interpretation.
//!
//! Gestures resolve against the current estimate to exactly one outcome;
//! anything unrecognized resolves to no requested change. Percentages are
//! integer 0-100 (truncating), matching the saturation test in the hold
//! logic.

use crate::status::MotionState;

/// Which physical button generated the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Up,
    Down,
}

/// How the button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressMode {
    Single,
    Double,
    Hold,
    Release,
}

/// Estimate snapshot a gesture resolves against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GestureContext {
    pub pos_pct: i32,
    pub tilt_pct: i32,
    pub action: MotionState,
    /// How far "up" gestures may open, as a position percentage.
    pub open_limit_pct: i32,
}

/// Resolved outcome of one button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gesture {
    None,
    Stop,
    /// Absolute position target; the tilt, when present, rides along through
    /// the deferred tilt queue.
    MoveTo {
        pos_pct: i32,
        tilt_pct: Option<i32>,
    },
    BeginHold {
        direction: i8,
    },
    EndHold,
}

pub(crate) fn resolve(kind: ButtonKind, press: PressMode, ctx: &GestureContext) -> Gesture {
    match (kind, press) {
        (_, PressMode::Release) => Gesture::EndHold,

        (ButtonKind::Up, PressMode::Single) => {
            if ctx.action == MotionState::Opening {
                // tap-to-stop
                Gesture::Stop
            } else if ctx.pos_pct < 3 && ctx.tilt_pct > 5 {
                // nearly open with tilted slats: go fully open and flat
                Gesture::MoveTo {
                    pos_pct: 0,
                    tilt_pct: Some(0),
                }
            } else if ctx.pos_pct > ctx.open_limit_pct {
                Gesture::MoveTo {
                    pos_pct: ctx.open_limit_pct,
                    tilt_pct: Some(0),
                }
            } else {
                Gesture::None
            }
        }
        (ButtonKind::Up, PressMode::Double) => Gesture::MoveTo {
            pos_pct: ctx.open_limit_pct,
            tilt_pct: Some(0),
        },
        (ButtonKind::Up, PressMode::Hold) => Gesture::BeginHold { direction: -1 },

        (ButtonKind::Down, PressMode::Single) => {
            if ctx.action == MotionState::Closing {
                Gesture::Stop
            } else if ctx.pos_pct < 100 || ctx.tilt_pct < 100 {
                Gesture::MoveTo {
                    pos_pct: 100,
                    tilt_pct: Some(100),
                }
            } else {
                Gesture::None
            }
        }
        (ButtonKind::Down, PressMode::Double) => {
            // closed but letting light through: slats forced flat
            if ctx.pos_pct < 97 || ctx.tilt_pct > 0 {
                Gesture::MoveTo {
                    pos_pct: 100,
                    tilt_pct: Some(0),
                }
            } else {
                Gesture::None
            }
        }
        (ButtonKind::Down, PressMode::Hold) => Gesture::BeginHold { direction: 1 },
    }
}
