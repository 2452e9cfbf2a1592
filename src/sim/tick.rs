//! Variable timestep simulation tick
//!
//! Core game loop that advances the world by one display frame. Every
//! time-based quantity is scaled by the measured `dt`, so the game plays the
//! same at 30, 60 or 144 Hz.

use rand::Rng;

use super::difficulty::compute_difficulty;
use super::rule::generate_rule;
use super::session;
use super::spawner::pick_next_object;
use super::state::{FallingObject, GameEvent, GameState, SessionPhase};
use crate::consts::*;

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    match state.session.phase {
        SessionPhase::Countdown => {
            state.countdown_remaining -= dt;
            if state.countdown_remaining <= 0.0 {
                session::finish_countdown(state);
            }
            return;
        }
        // Nothing moves outside of play
        SessionPhase::Menu | SessionPhase::Paused | SessionPhase::GameOver => return,
        SessionPhase::Playing => {}
    }

    state.session.elapsed += dt;

    // 1. Spawning
    state.since_last_spawn += dt;
    let difficulty = compute_difficulty(state.session.elapsed, state.session.mode)
        .with_frenzy(state.session.frenzy_active);
    if state.since_last_spawn * 1000.0 > difficulty.spawn_interval_ms
        && state.objects.len() < difficulty.max_concurrent_objects
    {
        spawn_object(state, difficulty.fall_speed_multiplier);
        state.since_last_spawn = 0.0;
    }

    // 2. Rule rotation
    if state.rule_clock.advance(dt) {
        let rule = generate_rule(&mut state.rng);
        log::debug!("Rule changed: {}", rule.text);
        state.emit(GameEvent::RuleChanged(rule.text.clone()));
        state.emit(GameEvent::Sound {
            cue: "whoosh",
            volume: 0.2,
            pitch: 1.0,
        });
        state.rule = Some(rule);
    }

    // 3. Timed effects
    decay_timers(state, dt);

    // 4. Falling objects. Falling off the bottom costs nothing.
    let frames = dt * REFERENCE_FPS;
    let cull_y = state.viewport.height + OFFSCREEN_MARGIN;
    for object in &mut state.objects {
        object.pos.y += object.speed * frames;
        object.rotation += object.spin * dt;
    }
    state.objects.retain(|o| o.pos.y <= cull_y);

    // 5. Transient effects
    advance_effects(state, dt);
}

/// Count down frenzy and double score
fn decay_timers(state: &mut GameState, dt: f32) {
    let session = &mut state.session;
    let mut frenzy_ended = false;
    let mut double_ended = false;

    if session.frenzy_active {
        session.frenzy_time_remaining -= dt;
        if session.frenzy_time_remaining <= 0.0 {
            session.frenzy_active = false;
            session.frenzy_time_remaining = 0.0;
            session.combo = 0;
            frenzy_ended = true;
        }
    }

    if session.double_score_active {
        session.double_score_time_remaining -= dt;
        if session.double_score_time_remaining <= 0.0 {
            session.double_score_active = false;
            session.double_score_time_remaining = 0.0;
            double_ended = true;
        }
    }

    if frenzy_ended {
        log::info!("Frenzy over");
        state.emit(GameEvent::FrenzyEnded);
    }
    if double_ended {
        state.emit(GameEvent::DoubleScoreEnded);
    }
}

/// Move, fade and cull particles, click rings and score popups
fn advance_effects(state: &mut GameState, dt: f32) {
    let frames = dt * REFERENCE_FPS;

    for particle in &mut state.particles {
        particle.pos += particle.vel * frames;
        particle.life -= dt * 2.0;
    }
    state.particles.retain(|p| p.life > 0.0);

    for ring in &mut state.click_rings {
        ring.life -= dt * 2.0;
        ring.scale += dt * 2.0;
    }
    state.click_rings.retain(|r| r.life > 0.0);

    for popup in &mut state.popups {
        popup.pos.y -= frames;
        popup.life -= dt * 1.5;
    }
    state.popups.retain(|p| p.life > 0.0);

    if state.screen_shake > 0.0 {
        state.screen_shake = (state.screen_shake - dt * 4.0).max(0.0);
    }
}

/// Spawn one object for the active rule at the top of the viewport
pub fn spawn_object(state: &mut GameState, speed_multiplier: f32) {
    let Some(rule) = &state.rule else {
        return;
    };
    let choice = pick_next_object(rule, state.session.elapsed, &mut state.rng);

    let base = BASE_OBJECT_SIZE * state.viewport.scale();
    let rng = &mut state.rng;
    let size = base + rng.random::<f32>() * base * OBJECT_SIZE_JITTER;
    let x = if state.viewport.width > base * 2.0 {
        rng.random::<f32>() * (state.viewport.width - base * 2.0) + base
    } else {
        state.viewport.width / 2.0
    };
    let speed = (1.5 + rng.random::<f32>() * 1.5) * speed_multiplier;
    let (rotation, spin) = if choice.object_type.rotates() {
        (
            rng.random_range(0.0..std::f32::consts::TAU),
            rng.random_range(-2.0..2.0),
        )
    } else {
        (0.0, 0.0)
    };

    let id = state.next_entity_id();
    state.objects.push(FallingObject {
        id,
        object_type: choice.object_type,
        color: choice.color,
        pos: glam::Vec2::new(x, -base * 2.0),
        speed,
        size,
        rotation,
        spin,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{ObjectColor, ObjectType};
    use crate::sim::modes::GameMode;
    use crate::sim::state::Viewport;
    use glam::Vec2;

    fn playing_state(mode: GameMode) -> GameState {
        let mut state = GameState::new(12345, Viewport::new(800.0, 600.0));
        assert!(session::start_session(&mut state, mode));
        state
    }

    fn place_object(state: &mut GameState, y: f32, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            object_type: ObjectType::Circle,
            color: ObjectColor::Red,
            pos: Vec2::new(400.0, y),
            speed,
            size: 40.0,
            rotation: 0.0,
            spin: 0.0,
        });
        id
    }

    #[test]
    fn test_first_spawn_waits_for_interval() {
        let mut state = playing_state(GameMode::Classic);
        // 1.25s < 1.4s initial interval
        for _ in 0..5 {
            tick(&mut state, 0.25);
        }
        assert!(state.objects.is_empty());
        tick(&mut state, 0.25);
        assert_eq!(state.objects.len(), 1);
        let x = state.objects[0].pos.x;
        assert!(x > 0.0 && x < 800.0);
    }

    #[test]
    fn test_spawn_respects_population_cap() {
        let mut state = playing_state(GameMode::Classic);
        for i in 0..6 {
            place_object(&mut state, 10.0 + i as f32, 0.0);
        }
        state.since_last_spawn = 10.0;
        tick(&mut state, 0.01);
        assert_eq!(state.objects.len(), 6);
    }

    #[test]
    fn test_offscreen_miss_is_free() {
        let mut state = playing_state(GameMode::Classic);
        state.session.score = 7;
        state.session.combo = 3;
        place_object(&mut state, 695.0, 10.0);
        state.since_last_spawn = -100.0;

        tick(&mut state, 1.0 / 60.0);
        assert!(state.objects.is_empty());
        assert_eq!(state.session.score, 7);
        assert_eq!(state.session.combo, 3);
        assert_eq!(state.session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_motion_is_frame_rate_independent() {
        let mut slow = playing_state(GameMode::Zen);
        let mut fast = playing_state(GameMode::Zen);
        slow.since_last_spawn = -100.0;
        fast.since_last_spawn = -100.0;
        place_object(&mut slow, 0.0, 3.0);
        place_object(&mut fast, 0.0, 3.0);

        for _ in 0..30 {
            tick(&mut slow, 1.0 / 30.0);
        }
        for _ in 0..120 {
            tick(&mut fast, 1.0 / 120.0);
        }
        // 3 px/frame at 60 Hz for one second
        assert!((slow.objects[0].pos.y - 180.0).abs() < 0.1);
        assert!((fast.objects[0].pos.y - 180.0).abs() < 0.1);
    }

    #[test]
    fn test_rule_rotates_once_per_interval() {
        let mut state = playing_state(GameMode::Classic);
        state.events.clear();
        // 10s classic interval in quarter-second frames
        for _ in 0..40 {
            tick(&mut state, 0.25);
        }
        let changes = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::RuleChanged(_)))
            .count();
        assert_eq!(changes, 1);
        assert_eq!(state.rule_clock.elapsed, 0.0);
    }

    #[test]
    fn test_frenzy_expiry_resets_combo() {
        let mut state = playing_state(GameMode::Classic);
        state.session.combo = 25;
        state.session.start_frenzy(0.5);
        tick(&mut state, 0.25);
        assert!(state.session.frenzy_active);
        assert_eq!(state.session.combo, 25);
        tick(&mut state, 0.25);
        assert!(!state.session.frenzy_active);
        assert_eq!(state.session.frenzy_time_remaining, 0.0);
        assert_eq!(state.session.combo, 0);
        assert!(state.events.contains(&GameEvent::FrenzyEnded));
    }

    #[test]
    fn test_double_score_expiry_keeps_combo() {
        let mut state = playing_state(GameMode::Classic);
        state.session.combo = 4;
        state.session.grant_double_score(0.1);
        tick(&mut state, 0.2);
        assert!(!state.session.double_score_active);
        assert_eq!(state.session.combo, 4);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut state = playing_state(GameMode::Classic);
        place_object(&mut state, 100.0, 5.0);
        assert!(session::pause(&mut state));
        let elapsed = state.session.elapsed;
        for _ in 0..10 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.objects[0].pos.y, 100.0);
        assert_eq!(state.session.elapsed, elapsed);
    }

    #[test]
    fn test_effects_decay_and_cull() {
        let mut state = playing_state(GameMode::Classic);
        state.since_last_spawn = -100.0;
        state.push_click_ring(crate::sim::state::ClickRing {
            pos: Vec2::ZERO,
            color: ObjectColor::Blue,
            life: 1.0,
            scale: 0.5,
        });
        tick(&mut state, 0.25);
        assert!((state.click_rings[0].life - 0.5).abs() < 1e-6);
        assert!((state.click_rings[0].scale - 1.0).abs() < 1e-6);
        tick(&mut state, 0.25);
        assert!(state.click_rings.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state(GameMode::Blitz);
        let mut b = playing_state(GameMode::Blitz);
        for _ in 0..600 {
            tick(&mut a, 1.0 / 60.0);
            tick(&mut b, 1.0 / 60.0);
        }
        assert_eq!(a.objects.len(), b.objects.len());
        for (x, y) in a.objects.iter().zip(&b.objects) {
            assert_eq!(x.object_type, y.object_type);
            assert_eq!(x.pos, y.pos);
        }
        assert_eq!(a.rule, b.rule);
    }
}
