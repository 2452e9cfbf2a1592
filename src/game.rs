//! Host-facing game driver
//!
//! `Game` owns the simulation state and the platform collaborators. Hosts
//! call `frame()` once per display refresh and forward taps and keys; the
//! game drains simulation events into audio, haptics and storage.
//!
//! Collaborator failures never reach the simulation: they are logged and
//! the game carries on as if the call had succeeded (or, for ads, as if the
//! ad was dismissed without a reward).

use glam::Vec2;
use serde::Serialize;

use crate::audio::{CuePlayer, LogPlayer};
use crate::challenges::{DailyChallenge, DailyChallenges};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::platform::{AdProvider, Haptics, KeyValueStore, MemoryStore, NoHaptics, StubAds};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameMode, GameState, SessionPhase, TapOutcome, Viewport, session};
use crate::skins::{Skin, SkinBook};

/// Everything the game needs from the outside world
pub struct Collaborators {
    pub store: Box<dyn KeyValueStore>,
    pub audio: Box<dyn CuePlayer>,
    pub haptics: Box<dyn Haptics>,
    pub ads: Box<dyn AdProvider>,
}

impl Collaborators {
    /// In-memory storage, logged audio, no haptics, stub ads
    pub fn headless() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            audio: Box::new(LogPlayer::default()),
            haptics: Box::new(NoHaptics),
            ads: Box::new(StubAds::default()),
        }
    }

    /// LocalStorage, Web Audio, `navigator.vibrate`, stub ads
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self {
            store: Box::new(crate::platform::web::LocalStorage::new()),
            audio: Box::new(crate::audio::WebAudioPlayer::new()),
            haptics: Box::new(crate::platform::web::NavigatorHaptics),
            ads: Box::new(StubAds::default()),
        }
    }
}

/// Read-only HUD view, refreshed at a UI-friendly cadence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: SessionPhase,
    pub mode: GameMode,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub high_score: u64,
    pub rule_text: Option<String>,
    /// 0-1, how far the current rule is through its interval
    pub rule_progress: f32,
    pub frenzy_active: bool,
    pub frenzy_time_remaining: f32,
    pub double_score_active: bool,
    pub double_score_time_remaining: f32,
    pub elapsed: f32,
    /// 3, 2, 1, then 0 for "GO"
    pub countdown: Option<u8>,
}

impl HudSnapshot {
    fn capture(state: &GameState) -> Self {
        let s = &state.session;
        Self {
            phase: s.phase,
            mode: s.mode,
            score: s.score,
            combo: s.combo,
            max_combo: s.max_combo,
            high_score: s.high_score,
            rule_text: state.rule.as_ref().map(|r| r.text.clone()),
            rule_progress: state.rule_clock.progress(),
            frenzy_active: s.frenzy_active,
            frenzy_time_remaining: s.frenzy_time_remaining,
            double_score_active: s.double_score_active,
            double_score_time_remaining: s.double_score_time_remaining,
            elapsed: s.elapsed,
            countdown: session::countdown_display(state),
        }
    }
}

/// Result of the last finished session, kept for the leaderboard prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionResult {
    pub score: u64,
    pub max_combo: u32,
    pub new_high_score: bool,
    /// Leaderboard rank the run would take, if any
    pub rank: Option<usize>,
}

/// Game driver
pub struct Game {
    state: GameState,
    store: Box<dyn KeyValueStore>,
    audio: Box<dyn CuePlayer>,
    haptics: Box<dyn Haptics>,
    ads: Box<dyn AdProvider>,
    settings: Settings,
    high_scores: HighScores,
    skins: SkinBook,
    challenges: DailyChallenges,
    /// Date key for today's challenge, set by the host
    today: Option<String>,
    /// Bumped on every session start/exit; stale frame callbacks compare against it
    generation: u64,
    snapshot: HudSnapshot,
    since_snapshot: f32,
    last_result: Option<SessionResult>,
    /// The current run already has a leaderboard entry (survives continues)
    run_submitted: bool,
    /// Presentation events (banner, frenzy, game over) for the host
    notices: Vec<GameEvent>,
}

impl Game {
    /// Build a game, loading persisted state. Missing or unreadable
    /// storage falls back to defaults.
    pub fn new(seed: u64, viewport: Viewport, collaborators: Collaborators) -> Self {
        let Collaborators {
            store,
            audio,
            haptics,
            ads,
        } = collaborators;

        let settings = Settings::load(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load settings: {}", e);
            Settings::default()
        });
        let high_scores = HighScores::load(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load high scores: {}", e);
            HighScores::default()
        });
        let skins = SkinBook::load(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load skins: {}", e);
            SkinBook::default()
        });
        let challenges = DailyChallenges::load(store.as_ref()).unwrap_or_else(|e| {
            log::warn!("Failed to load daily challenges: {}", e);
            DailyChallenges::default()
        });

        let mut state = GameState::new(seed, viewport);
        state.session.high_score = high_scores.best;
        let snapshot = HudSnapshot::capture(&state);

        let mut game = Self {
            state,
            store,
            audio,
            haptics,
            ads,
            settings,
            high_scores,
            skins,
            challenges,
            today: None,
            generation: 0,
            snapshot,
            since_snapshot: 0.0,
            last_result: None,
            run_submitted: false,
            notices: Vec::new(),
        };
        game.apply_settings();
        game
    }

    /// Headless game with in-memory collaborators
    pub fn headless(seed: u64, viewport: Viewport) -> Self {
        Self::new(seed, viewport, Collaborators::headless())
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.session.phase
    }

    pub fn snapshot(&self) -> &HudSnapshot {
        &self.snapshot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn skins(&self) -> &SkinBook {
        &self.skins
    }

    pub fn active_skin(&self) -> &'static Skin {
        self.skins.active_skin()
    }

    pub fn challenges(&self) -> &DailyChallenges {
        &self.challenges
    }

    /// Challenge for the day set by `set_today`
    pub fn today_challenge(&self) -> Option<&DailyChallenge> {
        self.today
            .as_ref()
            .and_then(|date| self.challenges.by_date.get(date))
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    /// Screen shake to draw, zero under reduced motion
    pub fn screen_shake(&self) -> f32 {
        if self.settings.effective_screen_shake() {
            self.state.screen_shake
        } else {
            0.0
        }
    }

    /// Take presentation events raised since the last call
    pub fn drain_notices(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.notices)
    }

    // === Frame driving ===

    /// Per-refresh entry point for host loops. Returns false, without
    /// stepping, when `generation` belongs to a cancelled session.
    pub fn frame(&mut self, generation: u64, dt: f32) -> bool {
        if generation != self.generation {
            return false;
        }
        self.step(dt);
        true
    }

    /// Advance the simulation by `dt` seconds and dispatch its feedback
    pub fn step(&mut self, dt: f32) {
        sim::tick(&mut self.state, dt);
        self.dispatch_events();

        self.since_snapshot += dt.max(0.0);
        if self.since_snapshot >= SNAPSHOT_INTERVAL {
            self.since_snapshot = 0.0;
            self.refresh_snapshot();
        }
    }

    /// Forward a tap in viewport pixels
    pub fn tap(&mut self, x: f32, y: f32) -> TapOutcome {
        let outcome = sim::resolve_tap(&mut self.state, Vec2::new(x, y));
        self.dispatch_events();
        if matches!(outcome, TapOutcome::Wrong { game_over: true }) {
            self.refresh_snapshot();
        }
        outcome
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Viewport::new(width.max(1.0), height.max(1.0));
    }

    // === Session transitions ===

    /// Start a session in the mode chosen in settings
    pub fn start(&mut self) -> bool {
        let mode = self.settings.mode();
        self.start_mode(mode)
    }

    pub fn start_mode(&mut self, mode: GameMode) -> bool {
        self.state.session.high_score = self.high_scores.best;
        if !session::start_session(&mut self.state, mode) {
            return false;
        }
        self.generation += 1;
        self.last_result = None;
        self.run_submitted = false;
        self.since_snapshot = 0.0;
        if self.settings.mode() != mode {
            self.settings.set_mode(mode);
            self.save_settings();
        }
        if let Err(e) = self.audio.resume() {
            log::warn!("Audio resume failed: {}", e);
        }
        self.apply_settings();
        self.dispatch_events();
        self.refresh_snapshot();
        true
    }

    /// Restart from game over or the pause menu, after an interstitial.
    /// An ad failure counts as dismissed.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.phase(), SessionPhase::GameOver | SessionPhase::Paused) {
            return false;
        }
        if let Err(e) = self.ads.show_interstitial() {
            log::warn!("Interstitial failed, continuing: {}", e);
        }
        let mode = self.state.session.mode;
        self.start_mode(mode)
    }

    pub fn pause(&mut self) -> bool {
        let paused = session::pause(&mut self.state);
        if paused {
            self.audio.mute();
            self.refresh_snapshot();
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = session::resume(&mut self.state);
        if resumed {
            self.apply_settings();
            self.refresh_snapshot();
        }
        resumed
    }

    /// Escape key
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            SessionPhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    pub fn exit_to_menu(&mut self) -> bool {
        if !session::exit_to_menu(&mut self.state) {
            return false;
        }
        self.generation += 1;
        self.apply_settings();
        self.refresh_snapshot();
        true
    }

    // === Rewarded ads ===

    fn watch_rewarded(&mut self) -> bool {
        match self.ads.show_rewarded() {
            Ok(granted) => granted,
            Err(e) => {
                log::warn!("Rewarded ad failed: {}", e);
                false
            }
        }
    }

    /// Continue a finished session with half the combo
    pub fn continue_with_ad(&mut self) -> bool {
        if self.phase() != SessionPhase::GameOver || !self.watch_rewarded() {
            return false;
        }
        let continued = session::continue_after_reward(&mut self.state);
        self.refresh_snapshot();
        continued
    }

    /// Double score for a while
    pub fn double_score_with_ad(&mut self) -> bool {
        if !matches!(
            self.phase(),
            SessionPhase::Playing | SessionPhase::Paused | SessionPhase::Countdown
        ) || !self.watch_rewarded()
        {
            return false;
        }
        let granted = session::grant_double_score(&mut self.state);
        self.refresh_snapshot();
        granted
    }

    pub fn unlock_skin_with_ad(&mut self, id: &str) -> bool {
        if crate::skins::find_skin(id).is_none() || self.skins.is_unlocked(id) {
            return false;
        }
        if !self.watch_rewarded() || !self.skins.unlock(id) {
            return false;
        }
        self.save_skins();
        true
    }

    // === Meta-game ===

    pub fn select_skin(&mut self, id: &str) -> bool {
        if !self.skins.set_active(id) {
            return false;
        }
        self.save_skins();
        true
    }

    pub fn update_settings(&mut self, mut settings: Settings) {
        settings.sanitize();
        self.settings = settings;
        self.apply_settings();
        self.save_settings();
    }

    /// Record the last finished run on the leaderboard under `name`.
    /// A run gets one entry, even across continues.
    pub fn submit_leaderboard_name(&mut self, name: &str, timestamp: f64) -> Option<usize> {
        if self.run_submitted {
            return None;
        }
        let result = self.last_result?;
        let rank = self
            .high_scores
            .add_score(name, result.score, result.max_combo, timestamp)?;
        self.run_submitted = true;
        if let Err(e) = self.high_scores.save_leaderboard(self.store.as_mut()) {
            log::warn!("Failed to save leaderboard: {}", e);
        }
        Some(rank)
    }

    pub fn clear_leaderboard(&mut self) {
        self.high_scores.clear_leaderboard();
        if let Err(e) = self.high_scores.save_leaderboard(self.store.as_mut()) {
            log::warn!("Failed to save leaderboard: {}", e);
        }
    }

    /// Set the calendar day used for daily challenges and return its challenge
    pub fn set_today(&mut self, date: &str) -> DailyChallenge {
        self.today = Some(date.to_string());
        let challenge = self.challenges.challenge_for(date).clone();
        self.save_challenges();
        challenge
    }

    // === Internals ===

    fn apply_settings(&mut self) {
        self.audio
            .set_volume(self.settings.master_volume, self.settings.sfx_volume);
        if self.settings.sound && self.phase() != SessionPhase::Paused {
            self.audio.unmute();
        } else {
            self.audio.mute();
        }
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot = HudSnapshot::capture(&self.state);
    }

    /// Route simulation events to collaborators
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound { cue, volume, pitch } => {
                    if !self.settings.sound {
                        continue;
                    }
                    if let Err(e) = self.audio.play(cue, volume, pitch) {
                        log::warn!("Skipping cue '{}': {}", cue, e);
                    }
                }
                GameEvent::Vibrate(haptic) => {
                    if !self.settings.vibration {
                        continue;
                    }
                    if let Err(e) = self.haptics.vibrate(&haptic) {
                        log::debug!("Vibration unavailable: {}", e);
                    }
                }
                GameEvent::GameOver {
                    score,
                    max_combo,
                    new_high_score,
                } => {
                    self.finish_session(score, max_combo, new_high_score);
                    self.notices.push(event);
                }
                GameEvent::RuleChanged(_)
                | GameEvent::FrenzyStarted
                | GameEvent::FrenzyEnded
                | GameEvent::DoubleScoreEnded
                | GameEvent::WrongTap { .. } => self.notices.push(event),
            }
        }
    }

    fn finish_session(&mut self, score: u64, max_combo: u32, new_high_score: bool) {
        if self.high_scores.record_score(score) {
            if let Err(e) = self.high_scores.save_best(self.store.as_mut()) {
                log::warn!("Failed to save high score: {}", e);
            }
        }

        if let Some(today) = self.today.clone() {
            let elapsed = self.state.session.elapsed;
            if let Some(points) = self
                .challenges
                .submit_result(&today, score, max_combo, elapsed)
            {
                log::info!("Daily challenge met, +{} points", points);
                self.save_challenges();
            }
        }

        self.last_result = Some(SessionResult {
            score,
            max_combo,
            new_high_score,
            rank: if self.run_submitted {
                None
            } else {
                self.high_scores.potential_rank(score, max_combo)
            },
        });
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.store.as_mut()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    fn save_skins(&mut self) {
        if let Err(e) = self.skins.save(self.store.as_mut()) {
            log::warn!("Failed to save skins: {}", e);
        }
    }

    fn save_challenges(&mut self) {
        if let Err(e) = self.challenges.save(self.store.as_mut()) {
            log::warn!("Failed to save daily challenges: {}", e);
        }
    }
}
