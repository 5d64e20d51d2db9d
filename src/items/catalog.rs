//! Standard item definitions.

use super::types::{Item, PotionEffect, WeaponType};
use crate::core::constants::*;

pub fn rock() -> Item {
    Item::weapon("Rock", "A basic weapon made of stone", 2, WeaponType::Rock)
}

pub fn paper() -> Item {
    Item::weapon(
        "Paper",
        "A mysterious weapon made of enchanted paper",
        3,
        WeaponType::Paper,
    )
}

pub fn scissors() -> Item {
    Item::weapon(
        "Scissors",
        "Sharp and precise cutting tool",
        4,
        WeaponType::Scissors,
    )
}

pub fn sword() -> Item {
    Item::weapon(
        "Sword",
        "A classic weapon of the brave",
        5,
        WeaponType::Scissors,
    )
}

pub fn axe() -> Item {
    Item::weapon(
        "Axe",
        "Heavy weapon for powerful attacks",
        7,
        WeaponType::Rock,
    )
}

pub fn bow() -> Item {
    Item::weapon(
        "Bow",
        "Ranged weapon for precision strikes",
        4,
        WeaponType::Paper,
    )
}

pub fn boss_weapon() -> Item {
    Item::weapon(
        "Boss Weapon",
        "Special weapon wielded by bosses",
        5,
        WeaponType::Rock,
    )
}

pub fn leather_armor() -> Item {
    Item::armor("Leather Armor", "Boiled hide that turns a glancing blow", 1)
}

pub fn healing_potion() -> Item {
    Item::potion(
        "Healing Potion",
        "Restores health",
        PotionEffect::Healing {
            amount: HEALING_POTION_AMOUNT,
        },
    )
}

pub fn strength_potion() -> Item {
    Item::potion(
        "Strength Potion",
        "Temporarily increases damage",
        PotionEffect::Strength {
            bonus: STRENGTH_POTION_BONUS,
            attacks: STRENGTH_POTION_ATTACKS,
        },
    )
}

pub fn gold(amount: u32) -> Item {
    Item::treasure("Gold", format!("{amount} gold coins"), amount)
}

/// Names accepted by [`starter_weapon`].
pub const STARTER_WEAPONS: [&str; 3] = ["Rock", "Paper", "Scissors"];

/// Resolves the hero's opening weapon choice, ignoring case and surrounding
/// whitespace.
pub fn starter_weapon(choice: &str) -> Option<Item> {
    match choice.trim().to_ascii_lowercase().as_str() {
        "rock" => Some(rock()),
        "paper" => Some(paper()),
        "scissors" => Some(scissors()),
        _ => None,
    }
}
