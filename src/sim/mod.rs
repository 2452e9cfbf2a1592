//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick(state, dt)`
//! - Seeded RNG only
//! - Stable iteration order (objects oldest first)
//! - No rendering or platform dependencies; feedback leaves as `GameEvent`s

pub mod catalog;
pub mod difficulty;
pub mod hit;
pub mod modes;
pub mod rule;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{ALL_OBJECT_TYPES, ObjectCategory, ObjectColor, ObjectType};
pub use difficulty::{Difficulty, compute_difficulty};
pub use hit::{TapOutcome, resolve_tap};
pub use modes::{GameMode, GameModeConfig};
pub use rule::{ActiveRule, RuleClock, RuleProperty, RuleTarget, generate_rule};
pub use spawner::{SpawnChoice, match_probability, pick_next_object};
pub use state::{
    ClickRing, FallingObject, GameEvent, GameState, Haptic, Particle, ScorePopup, SessionPhase,
    SessionState, Viewport,
};
pub use tick::{spawn_object, tick};
