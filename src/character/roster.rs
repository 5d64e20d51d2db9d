//! Stock characters.

use crate::core::constants::*;
use crate::core::error::GameResult;
use crate::items::catalog;

use super::types::{Character, Role};

pub const GOBLIN_KING: &str = "Goblin King";
pub const DARK_SORCERER: &str = "Dark Sorcerer";

pub fn goblin_king() -> GameResult<Character> {
    armed_boss(GOBLIN_KING, 1, 50, 8)
}

pub fn dark_sorcerer() -> GameResult<Character> {
    armed_boss(DARK_SORCERER, 2, 60, 9)
}

fn armed_boss(name: &str, boss_level: u32, health: u32, damage: u32) -> GameResult<Character> {
    let mut boss = Character::new(name, Role::Boss { boss_level }, health, damage)?;
    boss.equip(catalog::boss_weapon())?;
    Ok(boss)
}

pub fn sidekick(name: &str, loyalty: u32) -> GameResult<Character> {
    let (health, damage) = SIDEKICK_BASE_STATS;
    Character::new(name, Role::Sidekick { loyalty }, health, damage)
}

pub fn villain(name: &str, evil_level: u32) -> GameResult<Character> {
    let (health, damage) = VILLAIN_BASE_STATS;
    Character::new(name, Role::Villain { evil_level }, health, damage)
}

pub fn boss(name: &str, boss_level: u32) -> GameResult<Character> {
    let (health, damage) = BOSS_BASE_STATS;
    Character::new(name, Role::Boss { boss_level }, health, damage)
}
