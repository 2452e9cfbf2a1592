//! Tap resolution
//!
//! Maps a tap to the topmost live object under it and applies the rule.

use glam::Vec2;
use rand::Rng;

use super::session;
use super::state::{ClickRing, FallingObject, GameEvent, GameState, Haptic, Particle, ScorePopup, SessionPhase};
use crate::consts::*;

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Not accepting taps right now (menu, paused, countdown, game over)
    Ignored,
    /// Tap landed on empty space
    Missed,
    /// Correct object tapped
    Hit { points: u32, combo: u32, frenzy_started: bool },
    /// Wrong object tapped
    Wrong { game_over: bool },
}

/// Resolve a tap at `point` (viewport pixels)
pub fn resolve_tap(state: &mut GameState, point: Vec2) -> TapOutcome {
    if state.session.phase != SessionPhase::Playing {
        return TapOutcome::Ignored;
    }
    let Some(rule) = &state.rule else {
        return TapOutcome::Ignored;
    };

    // Newest objects are drawn last, so they win overlaps
    let tolerance = HIT_TOLERANCE * state.viewport.scale();
    let Some(index) = state
        .objects
        .iter()
        .rposition(|o| o.pos.distance(point) < o.radius() + tolerance)
    else {
        return TapOutcome::Missed;
    };

    let is_match = rule.matches(state.objects[index].object_type, state.objects[index].color);
    let object = state.objects.remove(index);

    if is_match {
        apply_hit(state, &object)
    } else {
        apply_miss(state, &object)
    }
}

fn apply_hit(state: &mut GameState, object: &FallingObject) -> TapOutcome {
    let config = state.session.mode.config();
    let points = state.session.points_per_hit();

    let session = &mut state.session;
    session.score += points as u64;
    session.combo += 1;
    session.max_combo = session.max_combo.max(session.combo);
    let combo = session.combo;

    let frenzy_started = !session.frenzy_active && combo >= config.combo_for_frenzy;
    if frenzy_started {
        session.start_frenzy(config.frenzy_duration);
        log::info!("Frenzy! combo {}", combo);
    }

    spawn_hit_effects(state, object, points);

    state.emit(GameEvent::Sound {
        cue: object.object_type.sound_cue(),
        volume: 0.4,
        pitch: 1.0 + (combo.min(20) as f32) * 0.02,
    });
    state.emit(GameEvent::Vibrate(Haptic::Pulse(HAPTIC_HIT_MS)));
    if frenzy_started {
        state.emit(GameEvent::FrenzyStarted);
        state.emit(GameEvent::Sound {
            cue: "sparkle",
            volume: 0.6,
            pitch: 1.0,
        });
    }

    TapOutcome::Hit {
        points,
        combo,
        frenzy_started,
    }
}

fn apply_miss(state: &mut GameState, object: &FallingObject) -> TapOutcome {
    state.emit(GameEvent::Sound {
        cue: "buzz",
        volume: 0.5,
        pitch: 1.0,
    });
    state.emit(GameEvent::Vibrate(Haptic::Pattern(HAPTIC_MISS_PATTERN.to_vec())));
    state.emit(GameEvent::WrongTap { object_id: object.id });
    state.screen_shake = 1.0;

    if state.session.mode.config().penalty_enabled {
        session::end_session(state);
        TapOutcome::Wrong { game_over: true }
    } else {
        state.session.combo = 0;
        TapOutcome::Wrong { game_over: false }
    }
}

/// Burst of particles, a click ring and a "+N" popup at the object
fn spawn_hit_effects(state: &mut GameState, object: &FallingObject, points: u32) {
    for i in 0..PARTICLES_PER_HIT {
        let angle = std::f32::consts::TAU * i as f32 / PARTICLES_PER_HIT as f32;
        let speed = 2.0 + state.rng.random::<f32>() * 4.0;
        let size = 2.0 + state.rng.random::<f32>() * 3.0;
        state.push_particle(Particle {
            pos: object.pos,
            vel: crate::direction(angle) * speed,
            color: object.color,
            life: 1.0,
            size,
        });
    }
    state.push_click_ring(ClickRing {
        pos: object.pos,
        color: object.color,
        life: 1.0,
        scale: 0.5,
    });
    state.push_popup(ScorePopup {
        pos: object.pos,
        points,
        life: 1.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{ObjectColor, ObjectType};
    use crate::sim::modes::GameMode;
    use crate::sim::rule::{ActiveRule, RuleTarget};
    use crate::sim::state::Viewport;

    fn playing_state(mode: GameMode) -> GameState {
        let mut state = GameState::new(7, Viewport::new(800.0, 800.0));
        assert!(session::start_session(&mut state, mode));
        state.rule = Some(ActiveRule::new(RuleTarget::Color(ObjectColor::Red)));
        state.events.clear();
        state
    }

    fn place(state: &mut GameState, ty: ObjectType, color: ObjectColor, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            object_type: ty,
            color,
            pos,
            speed: 2.0,
            size: 40.0,
            rotation: 0.0,
            spin: 0.0,
        });
        id
    }

    #[test]
    fn test_tap_on_empty_space_is_free() {
        let mut state = playing_state(GameMode::Classic);
        place(&mut state, ObjectType::Circle, ObjectColor::Blue, Vec2::new(100.0, 100.0));
        assert_eq!(resolve_tap(&mut state, Vec2::new(500.0, 500.0)), TapOutcome::Missed);
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.objects.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_hit_radius_includes_tolerance() {
        let mut state = playing_state(GameMode::Classic);
        place(&mut state, ObjectType::Square, ObjectColor::Red, Vec2::new(100.0, 100.0));
        // radius 20 + tolerance 15 at scale 1.0
        assert_eq!(resolve_tap(&mut state, Vec2::new(135.5, 100.0)), TapOutcome::Missed);
        assert!(matches!(
            resolve_tap(&mut state, Vec2::new(134.0, 100.0)),
            TapOutcome::Hit { .. }
        ));
    }

    #[test]
    fn test_match_scores_and_emits_feedback() {
        let mut state = playing_state(GameMode::Classic);
        place(&mut state, ObjectType::Star, ObjectColor::Red, Vec2::new(200.0, 200.0));
        let outcome = resolve_tap(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(
            outcome,
            TapOutcome::Hit {
                points: 1,
                combo: 1,
                frenzy_started: false
            }
        );
        assert!(state.objects.is_empty());
        assert_eq!(state.session.score, 1);
        assert_eq!(state.session.max_combo, 1);
        assert_eq!(state.particles.len(), PARTICLES_PER_HIT);
        assert_eq!(state.click_rings.len(), 1);
        assert_eq!(state.popups.len(), 1);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::Sound { cue: "whoosh", .. }
        )));
        assert!(state.events.contains(&GameEvent::Vibrate(Haptic::Pulse(HAPTIC_HIT_MS))));
    }

    #[test]
    fn test_topmost_object_wins() {
        let mut state = playing_state(GameMode::Classic);
        let below = place(&mut state, ObjectType::Circle, ObjectColor::Red, Vec2::new(300.0, 300.0));
        let above = place(&mut state, ObjectType::Circle, ObjectColor::Red, Vec2::new(305.0, 300.0));
        resolve_tap(&mut state, Vec2::new(302.0, 300.0));
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].id, below);
        assert_ne!(state.objects[0].id, above);
    }

    #[test]
    fn test_colored_fruit_never_matches_color_rule() {
        let mut state = playing_state(GameMode::Zen);
        place(&mut state, ObjectType::Apple, ObjectColor::Red, Vec2::new(100.0, 100.0));
        assert_eq!(
            resolve_tap(&mut state, Vec2::new(100.0, 100.0)),
            TapOutcome::Wrong { game_over: false }
        );
    }

    #[test]
    fn test_score_multipliers() {
        let mut state = playing_state(GameMode::Classic);
        let pos = Vec2::new(100.0, 100.0);

        place(&mut state, ObjectType::Circle, ObjectColor::Red, pos);
        resolve_tap(&mut state, pos);
        assert_eq!(state.session.score, 1);

        state.session.start_frenzy(5.0);
        place(&mut state, ObjectType::Circle, ObjectColor::Red, pos);
        resolve_tap(&mut state, pos);
        assert_eq!(state.session.score, 3);

        state.session.grant_double_score(DOUBLE_SCORE_SECS);
        place(&mut state, ObjectType::Circle, ObjectColor::Red, pos);
        assert!(matches!(
            resolve_tap(&mut state, pos),
            TapOutcome::Hit { points: 4, .. }
        ));
        assert_eq!(state.session.score, 7);
    }

    #[test]
    fn test_frenzy_triggers_at_threshold() {
        let mut state = playing_state(GameMode::Classic);
        let pos = Vec2::new(400.0, 400.0);
        for n in 1..=20 {
            place(&mut state, ObjectType::Triangle, ObjectColor::Red, pos);
            let outcome = resolve_tap(&mut state, pos);
            assert_eq!(
                outcome,
                TapOutcome::Hit {
                    points: 1,
                    combo: n,
                    frenzy_started: n == 20
                }
            );
        }
        assert!(state.session.frenzy_active);
        assert_eq!(state.session.frenzy_time_remaining, 5.0);
        assert_eq!(state.session.score, 20);
        assert!(state.events.contains(&GameEvent::FrenzyStarted));
    }

    #[test]
    fn test_wrong_tap_in_penalty_mode_ends_session() {
        let mut state = playing_state(GameMode::Classic);
        state.session.score = 12;
        state.session.high_score = 10;
        place(&mut state, ObjectType::Circle, ObjectColor::Blue, Vec2::new(100.0, 100.0));
        assert_eq!(
            resolve_tap(&mut state, Vec2::new(100.0, 100.0)),
            TapOutcome::Wrong { game_over: true }
        );
        assert_eq!(state.session.phase, SessionPhase::GameOver);
        assert_eq!(state.session.high_score, 12);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 12,
            max_combo: 0,
            new_high_score: true
        }));
    }

    #[test]
    fn test_wrong_tap_in_zen_resets_combo() {
        let mut state = playing_state(GameMode::Zen);
        state.session.combo = 9;
        let id = place(&mut state, ObjectType::Circle, ObjectColor::Green, Vec2::new(100.0, 100.0));
        assert_eq!(
            resolve_tap(&mut state, Vec2::new(100.0, 100.0)),
            TapOutcome::Wrong { game_over: false }
        );
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.combo, 0);
        assert!(state.objects.iter().all(|o| o.id != id));
        assert_eq!(state.screen_shake, 1.0);
    }

    #[test]
    fn test_taps_ignored_while_paused() {
        let mut state = playing_state(GameMode::Classic);
        place(&mut state, ObjectType::Circle, ObjectColor::Blue, Vec2::new(100.0, 100.0));
        session::pause(&mut state);
        assert_eq!(resolve_tap(&mut state, Vec2::new(100.0, 100.0)), TapOutcome::Ignored);
        session::resume(&mut state);
        assert_eq!(state.session.phase, SessionPhase::Countdown);
        assert_eq!(resolve_tap(&mut state, Vec2::new(100.0, 100.0)), TapOutcome::Ignored);
        assert_eq!(state.objects.len(), 1);
    }
}
