//! Rule-aware spawn selection
//!
//! Decides what the next falling object is. Matches are deliberately
//! over-represented early (45%) and thinned out over the first 30 seconds
//! (down to 25%). Distractors are chosen per rule family so they stay
//! plausible: other colors, other categories, or siblings of the exact target.

use rand::Rng;

use super::catalog::{ALL_OBJECT_TYPES, ObjectCategory, ObjectColor, ObjectType};
use super::rule::{ActiveRule, RuleTarget};
use crate::consts::*;

/// What to spawn next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnChoice {
    pub object_type: ObjectType,
    pub color: ObjectColor,
}

/// Probability that the next spawn is meant to satisfy the rule
pub fn match_probability(elapsed_secs: f32) -> f32 {
    let t = (elapsed_secs.max(0.0) / MATCH_DECAY_SECS).min(1.0);
    MATCH_CHANCE_START + (MATCH_CHANCE_END - MATCH_CHANCE_START) * t
}

/// Choose the type and color of the next object
pub fn pick_next_object<R: Rng + ?Sized>(
    rule: &ActiveRule,
    elapsed_secs: f32,
    rng: &mut R,
) -> SpawnChoice {
    let wants_match = rng.random::<f32>() < match_probability(elapsed_secs);
    pick_object(rule, wants_match, rng)
}

/// Choose a matching (`wants_match`) or distractor object for the rule
pub fn pick_object<R: Rng + ?Sized>(rule: &ActiveRule, wants_match: bool, rng: &mut R) -> SpawnChoice {
    match rule.target {
        RuleTarget::Color(target) => {
            let color = if wants_match {
                target
            } else {
                pick(&target.others(), rng)
            };
            SpawnChoice {
                object_type: pick(&ALL_OBJECT_TYPES, rng),
                color,
            }
        }
        RuleTarget::Category(target) => {
            let category = if wants_match {
                target
            } else {
                pick(&target.others(), rng)
            };
            SpawnChoice {
                object_type: pick(category.types(), rng),
                color: random_color(rng),
            }
        }
        RuleTarget::Exact(target) => {
            let object_type = if wants_match {
                target
            } else {
                exact_distractor(target, rng)
            };
            SpawnChoice {
                object_type,
                color: random_color(rng),
            }
        }
    }
}

/// A sibling of `target` from its own category, or any type from another
/// category when the target has no siblings
fn exact_distractor<R: Rng + ?Sized>(target: ObjectType, rng: &mut R) -> ObjectType {
    let siblings: Vec<ObjectType> = target
        .category()
        .types()
        .iter()
        .copied()
        .filter(|t| *t != target)
        .collect();
    if !siblings.is_empty() {
        return pick(&siblings, rng);
    }
    let other: ObjectCategory = pick(&target.category().others(), rng);
    pick(other.types(), rng)
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> ObjectColor {
    pick(&ObjectColor::ALL, rng)
}

fn pick<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> T {
    items[rng.random_range(0..items.len())]
}
