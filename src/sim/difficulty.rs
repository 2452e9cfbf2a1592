//! Difficulty curve
//!
//! Linear ramp over the first two minutes of a session, then a plateau.
//! Mode multipliers scale the whole curve; frenzy applies on top.

use serde::Serialize;

use super::modes::GameMode;
use crate::consts::*;

/// Spawn pacing for the current moment of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    /// Milliseconds between spawns
    pub spawn_interval_ms: f32,
    /// Multiplier applied to each new object's base fall speed
    pub fall_speed_multiplier: f32,
    /// Live object cap
    pub max_concurrent_objects: usize,
}

impl Difficulty {
    /// Frenzy spawns faster and drops objects harder
    pub fn with_frenzy(self, frenzy_active: bool) -> Self {
        if !frenzy_active {
            return self;
        }
        Self {
            spawn_interval_ms: self.spawn_interval_ms * FRENZY_SPAWN_FACTOR,
            fall_speed_multiplier: self.fall_speed_multiplier * FRENZY_SPEED_FACTOR,
            ..self
        }
    }
}

/// Ramp progress in [0, 1]
#[inline]
pub fn ramp_progress(elapsed_secs: f32) -> f32 {
    (elapsed_secs.max(0.0) / DIFFICULTY_RAMP_SECS).min(1.0)
}

/// Difficulty at `elapsed_secs` into a session of the given mode
pub fn compute_difficulty(elapsed_secs: f32, mode: GameMode) -> Difficulty {
    let config = mode.config();
    let p = ramp_progress(elapsed_secs);

    let spawn_interval =
        BASE_SPAWN_INTERVAL_MS - (BASE_SPAWN_INTERVAL_MS - MIN_SPAWN_INTERVAL_MS) * p;
    let speed = BASE_SPEED_MULTIPLIER + (MAX_SPEED_MULTIPLIER - BASE_SPEED_MULTIPLIER) * p;
    let max_objects = (BASE_MAX_OBJECTS + MAX_OBJECTS_GROWTH * p).floor() as usize;

    Difficulty {
        spawn_interval_ms: spawn_interval * config.spawn_rate_multiplier,
        fall_speed_multiplier: speed * config.speed_multiplier,
        max_concurrent_objects: max_objects,
    }
}
