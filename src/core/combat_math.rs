//! Shared combat math functions for attacks, abilities and encounters.
//!
//! These pure functions calculate combat outcomes without side effects.

use crate::core::constants::*;
use crate::items::types::WeaponType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the attacker's weapon type fares against the defender's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Matchup {
    Advantage,
    Disadvantage,
    Neutral,
}

impl Matchup {
    pub fn multiplier(&self) -> f64 {
        match self {
            Matchup::Advantage => ADVANTAGE_MULTIPLIER,
            Matchup::Disadvantage => DISADVANTAGE_MULTIPLIER,
            Matchup::Neutral => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Matchup::Advantage => "advantage",
            Matchup::Disadvantage => "disadvantage",
            Matchup::Neutral => "neutral",
        }
    }
}

/// Resolves the rock-paper-scissors matchup. Only applies when both
/// combatants wield a weapon; same-type matchups are neutral.
pub fn weapon_matchup(attacker: Option<WeaponType>, defender: Option<WeaponType>) -> Matchup {
    match (attacker, defender) {
        (Some(a), Some(d)) if a.beats(d) => Matchup::Advantage,
        (Some(a), Some(d)) if d.beats(a) => Matchup::Disadvantage,
        _ => Matchup::Neutral,
    }
}

/// Applies the matchup multiplier. Disadvantaged damage never drops below 1.
pub fn apply_matchup(raw_damage: u32, matchup: Matchup) -> u32 {
    let scaled = (raw_damage as f64 * matchup.multiplier()) as u32;
    match matchup {
        Matchup::Disadvantage => scaled.max(MIN_DISADVANTAGE_DAMAGE),
        _ => scaled,
    }
}

/// Roll for critical hit.
///
/// # Arguments
/// * `crit_chance` - Chance to crit (0.0-1.0, clamped)
/// * `rng` - Random number generator
pub fn roll_crit(crit_chance: f64, rng: &mut impl Rng) -> bool {
    if crit_chance <= 0.0 {
        return false;
    }
    rng.gen_bool(crit_chance.min(1.0))
}

pub fn apply_crit(damage: u32) -> u32 {
    (damage as f64 * CRIT_MULTIPLIER) as u32
}

/// Calculate actual damage taken after armor.
///
/// # Returns
/// Actual damage taken (minimum 0)
pub fn calculate_damage_taken(raw_damage: u32, defense: u32) -> u32 {
    raw_damage.saturating_sub(defense)
}

/// Grows a stat by a fractional percentage, rounding to the nearest integer.
pub fn grow_stat(value: u32, pct: f64) -> u32 {
    (value as f64 * (1.0 + pct)).round() as u32
}
