use crate::play::coverage::{CoverageType, Rotation};
use crate::play::field::HashPosition;

/// External loop runs at ~60Hz; everything here is re-evaluated against
/// elapsed time, never scheduled.
pub const TICK_INTERVAL: f32 = 1.0 / 60.0;

pub struct PlayTime {
    pub elapsed: f32,
}

impl PlayTime {
    pub fn new() -> Self {
        PlayTime { elapsed: 0.0 }
    }

    #[inline]
    pub fn increment(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.elapsed
    }
}

impl Default for PlayTime {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PlayContext {
    pub los: f32,
    pub hash: HashPosition,
    pub coverage: CoverageType,
    pub rotation: Option<Rotation>,
    pub time: PlayTime,
    pub snapped: bool,
}

impl PlayContext {
    pub fn new(los: f32, coverage: CoverageType) -> Self {
        PlayContext {
            los,
            hash: HashPosition::Middle,
            coverage,
            rotation: None,
            time: PlayTime::new(),
            snapped: false,
        }
    }
}
