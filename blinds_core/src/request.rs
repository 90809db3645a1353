//! Absolute cover requests from the automation layer.

/// One decoded request: absolute position and/or tilt targets, or a stop.
///
/// Mirrors the host-framework call object: position and tilt may arrive
/// combined in one request, in which case the tilt is deferred until the
/// position move reaches rest.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoverRequest {
    /// Target position fraction in [0, 1]; 0 = fully open.
    pub position: Option<f32>,
    /// Target tilt fraction in [0, 1]; 0 = flat.
    pub tilt: Option<f32>,
    pub stop: bool,
}

impl CoverRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop() -> Self {
        Self {
            stop: true,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: f32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = Some(tilt);
        self
    }
}
