//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`: the session counters,
//! the active rule, live falling objects, transient effects and the queue of
//! feedback events waiting for the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{ObjectColor, ObjectType};
use super::modes::GameMode;
use super::rule::{ActiveRule, RuleClock};
use crate::consts::*;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen, pause menu shown
    Paused,
    /// 3-2-1-GO before play resumes
    Countdown,
    /// Run ended
    GameOver,
}

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scale(&self) -> f32 {
        crate::scale_factor(self.width, self.height)
    }
}

/// A falling object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub object_type: ObjectType,
    pub color: ObjectColor,
    /// Center, viewport pixels
    pub pos: Vec2,
    /// Pixels per reference frame
    pub speed: f32,
    /// Diameter in pixels
    pub size: f32,
    /// Radians (shapes only)
    pub rotation: f32,
    /// Radians per second
    pub spin: f32,
}

impl FallingObject {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A spark from a successful tap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub color: ObjectColor,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Expanding ring drawn where a tap landed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRing {
    pub pos: Vec2,
    pub color: ObjectColor,
    pub life: f32,
    pub scale: f32,
}

/// Floating "+N"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub points: u32,
    pub life: f32,
}

/// Vibration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Haptic {
    Pulse(u32),
    Pattern(Vec<u32>),
}

/// Feedback emitted by the simulation for the host to act on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Play an audio cue
    Sound {
        cue: &'static str,
        volume: f32,
        pitch: f32,
    },
    /// Vibrate the device
    Vibrate(Haptic),
    /// A new rule took effect
    RuleChanged(String),
    FrenzyStarted,
    FrenzyEnded,
    DoubleScoreEnded,
    /// A wrong tap was made
    WrongTap { object_id: u32 },
    /// Session ended; `new_high_score` is set when the score beat the stored best
    GameOver { score: u64, max_combo: u32, new_high_score: bool },
}

/// Per-session counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub mode: GameMode,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub frenzy_active: bool,
    pub frenzy_time_remaining: f32,
    pub double_score_active: bool,
    pub double_score_time_remaining: f32,
    /// Seconds of actual play (paused and countdown time excluded)
    pub elapsed: f32,
    /// Best score seen so far, loaded by the host
    pub high_score: u64,
}

impl SessionState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            phase: SessionPhase::Menu,
            mode,
            score: 0,
            combo: 0,
            max_combo: 0,
            frenzy_active: false,
            frenzy_time_remaining: 0.0,
            double_score_active: false,
            double_score_time_remaining: 0.0,
            elapsed: 0.0,
            high_score: 0,
        }
    }

    /// Points for one correct tap: 1, doubled by frenzy, doubled again by the power-up
    pub fn points_per_hit(&self) -> u32 {
        let mut points = 1;
        if self.frenzy_active {
            points *= 2;
        }
        if self.double_score_active {
            points *= 2;
        }
        points
    }

    pub fn start_frenzy(&mut self, duration: f32) {
        self.frenzy_active = true;
        self.frenzy_time_remaining = duration;
    }

    pub fn grant_double_score(&mut self, duration: f32) {
        self.double_score_active = true;
        self.double_score_time_remaining = duration;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current session, for reproducing it
    pub seed: u64,
    pub rng: Pcg32,
    pub session: SessionState,
    /// Active rule (None until a session starts)
    pub rule: Option<ActiveRule>,
    pub rule_clock: RuleClock,
    /// Seconds since the last spawn
    pub since_last_spawn: f32,
    /// Seconds left on the resume countdown
    pub countdown_remaining: f32,
    pub viewport: Viewport,
    /// Live objects, oldest first
    pub objects: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub click_rings: Vec<ClickRing>,
    pub popups: Vec<ScorePopup>,
    /// Shake intensity 0-1 (wrong tap feedback)
    pub screen_shake: f32,
    /// Pending feedback for the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        let mode = GameMode::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: SessionState::new(mode),
            rule: None,
            rule_clock: RuleClock::new(mode.config().rule_change_interval),
            since_last_spawn: 0.0,
            countdown_remaining: 0.0,
            viewport,
            objects: Vec::new(),
            particles: Vec::new(),
            click_rings: Vec::new(),
            popups: Vec::new(),
            screen_shake: 0.0,
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Drop every live entity and pending event
    pub fn clear_world(&mut self) {
        self.objects.clear();
        self.particles.clear();
        self.click_rings.clear();
        self.popups.clear();
        self.events.clear();
        self.screen_shake = 0.0;
        self.next_id = 0;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn push_particle(&mut self, particle: Particle) {
        push_capped(&mut self.particles, particle, MAX_PARTICLES);
    }

    pub fn push_click_ring(&mut self, ring: ClickRing) {
        push_capped(&mut self.click_rings, ring, MAX_CLICK_RINGS);
    }

    pub fn push_popup(&mut self, popup: ScorePopup) {
        push_capped(&mut self.popups, popup, MAX_SCORE_POPUPS);
    }
}

/// Append, evicting the oldest entries to stay under `cap`
fn push_capped<T>(items: &mut Vec<T>, item: T, cap: usize) {
    if items.len() >= cap {
        let excess = items.len() + 1 - cap;
        items.drain(..excess);
    }
    items.push(item);
}
