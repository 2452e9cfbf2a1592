//! Active tap rule and its rotation clock

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::catalog::{ALL_OBJECT_TYPES, ObjectCategory, ObjectColor, ObjectType};

/// Which property a rule keys on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleProperty {
    Color,
    Category,
    ExactType,
}

/// The value a rule matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTarget {
    Color(ObjectColor),
    Category(ObjectCategory),
    Exact(ObjectType),
}

/// Rule family weights (percent): color / category / exact type
pub const COLOR_RULE_WEIGHT: u32 = 40;
pub const CATEGORY_RULE_WEIGHT: u32 = 30;

/// The predicate currently deciding which objects are safe to tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRule {
    pub target: RuleTarget,
    pub text: String,
}

impl ActiveRule {
    pub fn new(target: RuleTarget) -> Self {
        let text = match target {
            RuleTarget::Color(color) => format!("TAP {} ONLY", color.as_str().to_uppercase()),
            RuleTarget::Category(category) => {
                format!("TAP {} ONLY", category.as_str().to_uppercase())
            }
            RuleTarget::Exact(ty) => match ty.glyph() {
                Some(glyph) => format!("TAP {glyph} ONLY"),
                None => format!("TAP {}S ONLY", ty.name().to_uppercase()),
            },
        };
        Self { target, text }
    }

    pub fn property(&self) -> RuleProperty {
        match self.target {
            RuleTarget::Color(_) => RuleProperty::Color,
            RuleTarget::Category(_) => RuleProperty::Category,
            RuleTarget::Exact(_) => RuleProperty::ExactType,
        }
    }

    /// Does an object of this type and color satisfy the rule?
    ///
    /// Color rules only ever apply to shapes: fruits and faces have a fixed
    /// look, so their assigned color never makes them a match.
    pub fn matches(&self, ty: ObjectType, color: ObjectColor) -> bool {
        match self.target {
            RuleTarget::Color(target) => {
                ty.category() == ObjectCategory::Shapes && color == target
            }
            RuleTarget::Category(target) => ty.category() == target,
            RuleTarget::Exact(target) => ty == target,
        }
    }
}

/// Draw a fresh rule: 40% color, 30% category, 30% exact type
pub fn generate_rule<R: Rng + ?Sized>(rng: &mut R) -> ActiveRule {
    let roll = rng.random_range(0..100u32);
    let target = if roll < COLOR_RULE_WEIGHT {
        let colors = ObjectColor::ALL;
        RuleTarget::Color(colors[rng.random_range(0..colors.len())])
    } else if roll < COLOR_RULE_WEIGHT + CATEGORY_RULE_WEIGHT {
        let categories = ObjectCategory::ALL;
        RuleTarget::Category(categories[rng.random_range(0..categories.len())])
    } else {
        RuleTarget::Exact(ALL_OBJECT_TYPES[rng.random_range(0..ALL_OBJECT_TYPES.len())])
    };
    ActiveRule::new(target)
}

/// Tracks time since the last rule change
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleClock {
    /// Seconds since the rule last changed
    pub elapsed: f32,
    /// Seconds between changes
    pub interval: f32,
}

impl RuleClock {
    pub fn new(interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            interval,
        }
    }

    /// Advance by `dt`; returns true when the rule is due for replacement.
    /// The clock resets itself when it fires.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Fraction of the interval used up, for the HUD countdown bar
    pub fn progress(&self) -> f32 {
        if self.interval <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.interval).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
