//! Game mode table

use serde::{Deserialize, Serialize};

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    Blitz,
    Zen,
    Frenzy,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::Blitz,
        GameMode::Zen,
        GameMode::Frenzy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Blitz => "blitz",
            GameMode::Zen => "zen",
            GameMode::Frenzy => "frenzy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "blitz" => Some(GameMode::Blitz),
            "zen" => Some(GameMode::Zen),
            "frenzy" | "endless" => Some(GameMode::Frenzy),
            _ => None,
        }
    }

    /// Static tuning for this mode
    pub fn config(&self) -> &'static GameModeConfig {
        match self {
            GameMode::Classic => &CLASSIC,
            GameMode::Blitz => &BLITZ,
            GameMode::Zen => &ZEN,
            GameMode::Frenzy => &ENDLESS_FRENZY,
        }
    }
}

/// Per-mode tuning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameModeConfig {
    pub mode: GameMode,
    pub name: &'static str,
    pub description: &'static str,
    /// Scales the spawn interval (below 1 = more objects)
    pub spawn_rate_multiplier: f32,
    /// Scales fall speed
    pub speed_multiplier: f32,
    /// Wrong tap ends the session
    pub penalty_enabled: bool,
    /// Seconds between rule changes
    pub rule_change_interval: f32,
    /// Combo needed to enter frenzy
    pub combo_for_frenzy: u32,
    /// Frenzy length in seconds
    pub frenzy_duration: f32,
    /// Session opens with frenzy already running
    pub starts_in_frenzy: bool,
}

static CLASSIC: GameModeConfig = GameModeConfig {
    mode: GameMode::Classic,
    name: "CLASSIC",
    description: "Standard mode with progressive difficulty",
    spawn_rate_multiplier: 1.0,
    speed_multiplier: 1.0,
    penalty_enabled: true,
    rule_change_interval: 10.0,
    combo_for_frenzy: 20,
    frenzy_duration: 5.0,
    starts_in_frenzy: false,
};

static BLITZ: GameModeConfig = GameModeConfig {
    mode: GameMode::Blitz,
    name: "BLITZ",
    description: "Fast-paced action! Double speed, quick rules",
    spawn_rate_multiplier: 0.5,
    speed_multiplier: 1.8,
    penalty_enabled: true,
    rule_change_interval: 6.0,
    combo_for_frenzy: 15,
    frenzy_duration: 4.0,
    starts_in_frenzy: false,
};

static ZEN: GameModeConfig = GameModeConfig {
    mode: GameMode::Zen,
    name: "ZEN",
    description: "Relaxing mode with no penalties",
    spawn_rate_multiplier: 1.5,
    speed_multiplier: 0.7,
    penalty_enabled: false,
    rule_change_interval: 15.0,
    combo_for_frenzy: 30,
    frenzy_duration: 6.0,
    starts_in_frenzy: false,
};

static ENDLESS_FRENZY: GameModeConfig = GameModeConfig {
    mode: GameMode::Frenzy,
    name: "ENDLESS FRENZY",
    description: "Always in frenzy mode! Maximum chaos",
    spawn_rate_multiplier: 0.4,
    speed_multiplier: 1.5,
    penalty_enabled: true,
    rule_change_interval: 8.0,
    combo_for_frenzy: 999,
    frenzy_duration: 999.0,
    starts_in_frenzy: true,
};
