#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core motion logic for a time-based venetian blind controller
//! (hardware-agnostic).
//!
//! The blind has two coupled axes driven by one motor: vertical position and
//! slat tilt. There is no encoder; both axes are estimated purely from
//! elapsed motor-on time, in integer milliseconds. All hardware interactions
//! go through the `blinds_traits::Actuator` and `blinds_traits::StateSink`
//! traits.
//!
//! ## Architecture
//!
//! - **Command intake**: absolute position/tilt/stop requests (`CoverRequest`,
//!   [`CoverCore::apply`])
//! - **Motion engine**: the per-tick state machine ([`CoverCore::tick`])
//! - **Deferred tilt queue**: one pending tilt applied after a position move
//!   reaches rest (`state` module)
//! - **Button gestures**: tap/double-tap/hold/release interpretation
//!   (`button` module, [`CoverCore::on_button`])
//! - **Calibration**: full-traversal re-anchoring against a mechanical stop
//!
//! ## Conventions
//!
//! Public position and tilt are `f32` fractions in [0, 1]: 0 = fully open /
//! flat, 1 = fully closed / fully tilted. Closing increases both axes.
//! Internally each axis counts milliseconds of motor-on time, clamped to
//! `[0, close_duration]` / `[0, tilt_duration]`.

pub mod button;
pub mod builder;
pub mod config;
pub mod conversions;
pub mod core;
pub mod error;
pub mod mocks;
pub mod request;
pub mod state;
pub mod status;

pub use crate::builder::{Cover, CoverBuilder, build_cover};
pub use crate::button::{ButtonKind, PressMode};
pub use crate::config::{ButtonCfg, DriveCfg};
pub use crate::core::CoverCore;
pub use crate::error::{BuildError, Result};
pub use crate::request::CoverRequest;
pub use crate::status::{CoverSnapshot, MotionState};
