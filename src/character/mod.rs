//! Characters: stats, combat actions, leveling, abilities and the player.

pub mod abilities;
pub mod player;
pub mod progression;
pub mod roster;
pub mod status;
pub mod types;

pub use abilities::{AbilityOutcome, AbilityPlan, SpecialAbility};
pub use player::Player;
pub use status::{StatusEffect, TurnStart};
pub use types::*;
