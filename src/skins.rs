//! Skins: which hex colours the four object colours are drawn with
//!
//! The simulation only knows colour names. A skin binds those names to
//! concrete colours plus a background. Skins beyond the default are unlocked
//! by watching rewarded ads.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, PlatformError, load_json, save_json};
use crate::sim::ObjectColor;

pub const DEFAULT_SKIN_ID: &str = "default";

pub const SKINS_KEY: &str = "tap_rush_skins";
pub const ACTIVE_SKIN_KEY: &str = "tap_rush_active_skin";

/// Hex colour for each object colour name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub red: &'static str,
    pub blue: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
}

impl ColorScheme {
    pub fn get(&self, color: ObjectColor) -> &'static str {
        match color {
            ObjectColor::Red => self.red,
            ObjectColor::Blue => self.blue,
            ObjectColor::Green => self.green,
            ObjectColor::Yellow => self.yellow,
        }
    }
}

/// Flat base colour with two soft radial glows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub base: &'static str,
    /// (x, y) as a fraction of the viewport, and glow colour
    pub glows: [(f32, f32, &'static str); 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: ColorScheme,
    pub background: Background,
    /// Rewarded ads needed to unlock (0 = free)
    pub ad_cost: u32,
}

pub static SKINS: [Skin; 5] = [
    Skin {
        id: DEFAULT_SKIN_ID,
        name: "Neon Classic",
        colors: ColorScheme {
            red: "#ff004d",
            blue: "#00fff7",
            green: "#00ff85",
            yellow: "#f5f500",
        },
        background: Background {
            base: "#0d0d0d",
            glows: [(0.2, 0.5, "rgba(0, 255, 247, 0.15)"), (0.8, 0.8, "rgba(255, 0, 77, 0.15)")],
        },
        ad_cost: 0,
    },
    Skin {
        id: "sunset",
        name: "Sunset Vibes",
        colors: ColorScheme {
            red: "#ff6b6b",
            blue: "#4ecdc4",
            green: "#ffd93d",
            yellow: "#ff9a9e",
        },
        background: Background {
            base: "#140f19",
            glows: [(0.2, 0.3, "rgba(255, 107, 107, 0.2)"), (0.8, 0.7, "rgba(255, 211, 61, 0.2)")],
        },
        ad_cost: 1,
    },
    Skin {
        id: "ocean",
        name: "Ocean Depths",
        colors: ColorScheme {
            red: "#667eea",
            blue: "#00d4ff",
            green: "#06ffa5",
            yellow: "#fffb7d",
        },
        background: Background {
            base: "#0a0f1e",
            glows: [(0.3, 0.4, "rgba(0, 212, 255, 0.2)"), (0.7, 0.6, "rgba(102, 126, 234, 0.2)")],
        },
        ad_cost: 1,
    },
    Skin {
        id: "fire",
        name: "Fire Storm",
        colors: ColorScheme {
            red: "#ff0000",
            blue: "#ff6600",
            green: "#ffcc00",
            yellow: "#ff9900",
        },
        background: Background {
            base: "#190500",
            glows: [(0.25, 0.25, "rgba(255, 0, 0, 0.25)"), (0.75, 0.75, "rgba(255, 102, 0, 0.25)")],
        },
        ad_cost: 2,
    },
    Skin {
        id: "cyberpunk",
        name: "Cyberpunk",
        colors: ColorScheme {
            red: "#ff2a6d",
            blue: "#05d9e8",
            green: "#01012b",
            yellow: "#d1f7ff",
        },
        background: Background {
            base: "#01011b",
            glows: [(0.2, 0.4, "rgba(255, 42, 109, 0.2)"), (0.8, 0.6, "rgba(5, 217, 232, 0.2)")],
        },
        ad_cost: 2,
    },
];

pub fn find_skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

/// Unlock progress and the active selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinBook {
    /// Ids of unlocked skins (free skins are always unlocked)
    pub unlocked: Vec<String>,
    pub active: String,
}

impl Default for SkinBook {
    fn default() -> Self {
        Self {
            unlocked: Vec::new(),
            active: DEFAULT_SKIN_ID.to_string(),
        }
    }
}

impl SkinBook {
    pub fn is_unlocked(&self, id: &str) -> bool {
        match find_skin(id) {
            Some(skin) => skin.ad_cost == 0 || self.unlocked.iter().any(|u| u == id),
            None => false,
        }
    }

    /// Every skin with its unlock flag
    pub fn skins(&self) -> impl Iterator<Item = (&'static Skin, bool)> + '_ {
        SKINS.iter().map(|s| (s, self.is_unlocked(s.id)))
    }

    /// Active skin, falling back to the default if the stored id is stale
    pub fn active_skin(&self) -> &'static Skin {
        find_skin(&self.active)
            .filter(|s| self.is_unlocked(s.id))
            .unwrap_or(&SKINS[0])
    }

    /// Select an unlocked skin
    pub fn set_active(&mut self, id: &str) -> bool {
        if !self.is_unlocked(id) {
            log::warn!("Cannot select locked or unknown skin '{}'", id);
            return false;
        }
        self.active = id.to_string();
        true
    }

    /// Mark a skin unlocked; false for unknown ids
    pub fn unlock(&mut self, id: &str) -> bool {
        if find_skin(id).is_none() {
            return false;
        }
        if !self.is_unlocked(id) {
            self.unlocked.push(id.to_string());
            log::info!("Skin '{}' unlocked", id);
        }
        true
    }

    pub fn load(store: &dyn KeyValueStore) -> Result<Self, PlatformError> {
        let unlocked: Vec<String> = load_json(store, SKINS_KEY)?.unwrap_or_default();
        let active: String =
            load_json(store, ACTIVE_SKIN_KEY)?.unwrap_or_else(|| DEFAULT_SKIN_ID.to_string());
        Ok(Self { unlocked, active })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), PlatformError> {
        save_json(store, SKINS_KEY, &self.unlocked)?;
        save_json(store, ACTIVE_SKIN_KEY, &self.active)
    }
}
