//! Session / pause state machine
//!
//! ```text
//! Menu ──start──▶ Playing ──wrong tap──▶ GameOver ──restart──▶ Playing
//!                  │   ▲                    │  └──continue──▶ Playing (combo halved)
//!            pause │   │ countdown done     └──exit──▶ Menu
//!                  ▼   │
//!               Paused ──resume──▶ Countdown
//! ```
//!
//! Every transition returns `false` (and changes nothing) when it does not
//! apply to the current phase.

use super::modes::GameMode;
use super::rule::{RuleClock, generate_rule};
use super::state::{GameEvent, GameState, SessionPhase, SessionState};
use crate::consts::*;

/// Total countdown length: one second per number plus the "GO" beat
pub fn countdown_total() -> f32 {
    COUNTDOWN_STEPS as f32 + COUNTDOWN_GO_SECS
}

/// Begin a fresh session in `mode`, discarding the previous one.
/// Valid from the menu, from game over (restart) and from the pause menu.
pub fn start_session(state: &mut GameState, mode: GameMode) -> bool {
    match state.session.phase {
        SessionPhase::Menu | SessionPhase::GameOver | SessionPhase::Paused => {}
        SessionPhase::Playing | SessionPhase::Countdown => {
            log::debug!("start_session ignored in {:?}", state.session.phase);
            return false;
        }
    }

    let config = mode.config();
    let high_score = state.session.high_score;
    state.clear_world();
    state.session = SessionState::new(mode);
    state.session.high_score = high_score;
    state.session.phase = SessionPhase::Playing;
    if config.starts_in_frenzy {
        state.session.start_frenzy(config.frenzy_duration);
    }

    state.since_last_spawn = 0.0;
    state.countdown_remaining = 0.0;
    state.rule_clock = RuleClock::new(config.rule_change_interval);
    let rule = generate_rule(&mut state.rng);
    state.emit(GameEvent::RuleChanged(rule.text.clone()));
    state.rule = Some(rule);

    log::info!("Session started: mode={} seed={}", mode.as_str(), state.seed);
    true
}

/// Freeze play and show the pause menu
pub fn pause(state: &mut GameState) -> bool {
    match state.session.phase {
        SessionPhase::Playing | SessionPhase::Countdown => {
            state.session.phase = SessionPhase::Paused;
            state.countdown_remaining = 0.0;
            true
        }
        _ => false,
    }
}

/// Leave the pause menu through the 3-2-1-GO countdown
pub fn resume(state: &mut GameState) -> bool {
    if state.session.phase != SessionPhase::Paused {
        return false;
    }
    state.session.phase = SessionPhase::Countdown;
    state.countdown_remaining = countdown_total();
    true
}

/// Escape-key behaviour: pause when running, resume when paused
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.session.phase {
        SessionPhase::Playing | SessionPhase::Countdown => pause(state),
        SessionPhase::Paused => resume(state),
        _ => false,
    }
}

/// Countdown ran out; hand control back to the player
pub(crate) fn finish_countdown(state: &mut GameState) {
    state.countdown_remaining = 0.0;
    state.session.phase = SessionPhase::Playing;
}

/// Number to show during the countdown: 3, 2, 1, then 0 for "GO"
pub fn countdown_display(state: &GameState) -> Option<u8> {
    if state.session.phase != SessionPhase::Countdown {
        return None;
    }
    let numbered = state.countdown_remaining - COUNTDOWN_GO_SECS;
    if numbered <= 0.0 {
        Some(0)
    } else {
        Some((numbered.ceil() as u8).min(COUNTDOWN_STEPS))
    }
}

/// Return to the title screen, discarding the session's world
pub fn exit_to_menu(state: &mut GameState) -> bool {
    if state.session.phase == SessionPhase::Menu {
        return false;
    }
    state.clear_world();
    state.rule = None;
    state.countdown_remaining = 0.0;
    state.session.phase = SessionPhase::Menu;
    true
}

/// End the session after a penalised tap
pub fn end_session(state: &mut GameState) {
    if state.session.phase != SessionPhase::Playing {
        return;
    }
    let session = &mut state.session;
    session.phase = SessionPhase::GameOver;
    let new_high_score = session.score > session.high_score;
    if new_high_score {
        session.high_score = session.score;
    }
    let event = GameEvent::GameOver {
        score: session.score,
        max_combo: session.max_combo,
        new_high_score,
    };
    log::info!(
        "Game over: score={} max_combo={} new_high={}",
        session.score,
        session.max_combo,
        new_high_score
    );
    state.emit(event);
}

/// Rewarded continue: back into play from game over with half the combo
pub fn continue_after_reward(state: &mut GameState) -> bool {
    if state.session.phase != SessionPhase::GameOver {
        return false;
    }
    state.session.combo /= 2;
    state.session.phase = SessionPhase::Playing;
    log::info!("Continued with combo {}", state.session.combo);
    true
}

/// Rewarded power-up: double score for a while
pub fn grant_double_score(state: &mut GameState) -> bool {
    match state.session.phase {
        SessionPhase::Playing | SessionPhase::Paused | SessionPhase::Countdown => {
            state.session.grant_double_score(DOUBLE_SCORE_SECS);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::sim::tick;

    fn new_state() -> GameState {
        GameState::new(2024, Viewport::default())
    }

    #[test]
    fn test_start_from_menu() {
        let mut state = new_state();
        assert_eq!(state.session.phase, SessionPhase::Menu);
        assert!(start_session(&mut state, GameMode::Blitz));
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.mode, GameMode::Blitz);
        assert_eq!(state.rule_clock.interval, 6.0);
        assert!(state.rule.is_some());
        assert!(!start_session(&mut state, GameMode::Classic));
    }

    #[test]
    fn test_restart_resets_counters_but_keeps_best() {
        let mut state = new_state();
        start_session(&mut state, GameMode::Classic);
        state.session.score = 40;
        state.session.combo = 8;
        state.session.max_combo = 8;
        end_session(&mut state);
        assert_eq!(state.session.high_score, 40);

        assert!(start_session(&mut state, GameMode::Classic));
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.combo, 0);
        assert_eq!(state.session.max_combo, 0);
        assert_eq!(state.session.elapsed, 0.0);
        assert_eq!(state.session.high_score, 40);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_pause_resume_goes_through_countdown() {
        let mut state = new_state();
        start_session(&mut state, GameMode::Classic);
        assert!(pause(&mut state));
        assert!(!pause(&mut state));
        assert!(resume(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Countdown);
        assert_eq!(countdown_display(&state), Some(3));

        tick(&mut state, 0.25);
        tick(&mut state, 0.25);
        assert_eq!(countdown_display(&state), Some(3));
        tick(&mut state, 0.25);
        tick(&mut state, 0.25);
        assert_eq!(countdown_display(&state), Some(2));
        for _ in 0..4 {
            tick(&mut state, 0.25);
        }
        assert_eq!(countdown_display(&state), Some(1));
        for _ in 0..4 {
            tick(&mut state, 0.25);
        }
        assert_eq!(countdown_display(&state), Some(0));
        assert_eq!(state.session.elapsed, 0.0);

        tick(&mut state, 0.25);
        tick(&mut state, 0.25);
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(countdown_display(&state), None);
    }

    #[test]
    fn test_escape_toggles() {
        let mut state = new_state();
        assert!(!toggle_pause(&mut state));
        start_session(&mut state, GameMode::Zen);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Paused);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Countdown);
        assert!(toggle_pause(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Paused);
    }

    #[test]
    fn test_exit_discards_world() {
        let mut state = new_state();
        start_session(&mut state, GameMode::Classic);
        for _ in 0..120 {
            tick(&mut state, 1.0 / 30.0);
        }
        assert!(!state.objects.is_empty());
        pause(&mut state);
        assert!(exit_to_menu(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Menu);
        assert!(state.objects.is_empty());
        assert!(state.rule.is_none());
        assert!(!exit_to_menu(&mut state));
    }

    #[test]
    fn test_continue_halves_combo() {
        let mut state = new_state();
        start_session(&mut state, GameMode::Classic);
        assert!(!continue_after_reward(&mut state));
        state.session.combo = 15;
        end_session(&mut state);
        assert!(continue_after_reward(&mut state));
        assert_eq!(state.session.phase, SessionPhase::Playing);
        assert_eq!(state.session.combo, 7);
    }

    #[test]
    fn test_endless_frenzy_starts_frenzied() {
        let mut state = new_state();
        start_session(&mut state, GameMode::Frenzy);
        assert!(state.session.frenzy_active);
        assert_eq!(state.session.points_per_hit(), 2);
    }

    #[test]
    fn test_double_score_grant() {
        let mut state = new_state();
        assert!(!grant_double_score(&mut state));
        start_session(&mut state, GameMode::Classic);
        assert!(grant_double_score(&mut state));
        assert!(state.session.double_score_active);
        assert_eq!(state.session.double_score_time_remaining, DOUBLE_SCORE_SECS);
    }
}
