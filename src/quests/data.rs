//! Stock quests.

use crate::character::roster::{DARK_SORCERER, GOBLIN_KING};
use crate::items::catalog;

use super::types::{Objective, Quest, Reward};

pub fn goblin_king_bounty() -> Quest {
    Quest::new(
        "Goblin King Bounty",
        "The Goblin King raids the villages. End his reign.",
    )
    .with_objective(Objective::defeat(GOBLIN_KING, 1))
    .with_reward(Reward::Experience(100))
    .with_reward(Reward::Gold(50))
}

pub fn dark_sorcerer_bounty() -> Quest {
    Quest::new(
        "Dark Sorcerer Bounty",
        "A sorcerer poisons the land from his tower.",
    )
    .with_objective(Objective::defeat(DARK_SORCERER, 1))
    .with_reward(Reward::Experience(200))
    .with_reward(Reward::Item(catalog::healing_potion()))
}

pub fn hero_journey() -> Quest {
    Quest::new("Hero's Journey", "Rid the realm of both tyrants.")
        .with_objective(Objective::defeat(GOBLIN_KING, 1))
        .with_objective(Objective::defeat(DARK_SORCERER, 1))
        .with_reward(Reward::Item(catalog::axe()))
}

pub fn starter_quests() -> Vec<Quest> {
    vec![goblin_king_bounty(), dark_sorcerer_bounty(), hero_journey()]
}
