//! Tap Rush - a falling-object reflex game
//!
//! Core modules:
//! - `sim`: Simulation (rules, difficulty, spawning, per-frame step, tap resolution, session phases)
//! - `platform`: Storage / haptics / ads collaborators with native and browser backends
//! - `audio`: Cue player
//! - `game`: Host-facing driver wiring the simulation to its collaborators
//! - `highscores`, `settings`, `skins`, `challenges`: Persisted meta-game state

pub mod audio;
pub mod challenges;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod skins;

pub use game::{Game, HudSnapshot};
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Motion speeds are authored in pixels per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta the simulation accepts (tab switches, debugger stops)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Difficulty ramp length (seconds)
    pub const DIFFICULTY_RAMP_SECS: f32 = 120.0;
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 1400.0;
    pub const MIN_SPAWN_INTERVAL_MS: f32 = 450.0;
    pub const BASE_SPEED_MULTIPLIER: f32 = 2.0;
    pub const MAX_SPEED_MULTIPLIER: f32 = 5.0;
    pub const BASE_MAX_OBJECTS: f32 = 6.0;
    pub const MAX_OBJECTS_GROWTH: f32 = 10.0;
    /// Frenzy compresses the spawn interval and speeds objects up
    pub const FRENZY_SPAWN_FACTOR: f32 = 0.6;
    pub const FRENZY_SPEED_FACTOR: f32 = 1.3;

    /// Spawner match bias: starts generous, decays over the opening seconds
    pub const MATCH_CHANCE_START: f32 = 0.45;
    pub const MATCH_CHANCE_END: f32 = 0.25;
    pub const MATCH_DECAY_SECS: f32 = 30.0;

    /// Object geometry (before viewport scaling)
    pub const BASE_OBJECT_SIZE: f32 = 40.0;
    pub const OBJECT_SIZE_JITTER: f32 = 0.4;
    pub const HIT_TOLERANCE: f32 = 15.0;
    /// Objects are culled this far below the viewport
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Transient effect caps
    pub const MAX_PARTICLES: usize = 200;
    pub const MAX_CLICK_RINGS: usize = 20;
    pub const MAX_SCORE_POPUPS: usize = 20;
    pub const PARTICLES_PER_HIT: usize = 20;

    /// Power-ups
    pub const DOUBLE_SCORE_SECS: f32 = 15.0;

    /// Resume countdown: 3-2-1 one second each, then "GO" for half a second
    pub const COUNTDOWN_STEPS: u8 = 3;
    pub const COUNTDOWN_GO_SECS: f32 = 0.5;

    /// HUD snapshot cadence (seconds)
    pub const SNAPSHOT_INTERVAL: f32 = 0.05;

    /// Haptic patterns (milliseconds)
    pub const HAPTIC_HIT_MS: u32 = 15;
    pub const HAPTIC_MISS_PATTERN: [u32; 5] = [30, 100, 30, 100, 30];
}

/// Viewport scale factor: 800px is the design size, clamped to [0.5, 1.5]
#[inline]
pub fn scale_factor(width: f32, height: f32) -> f32 {
    (width.min(height) / 800.0).clamp(0.5, 1.5)
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
