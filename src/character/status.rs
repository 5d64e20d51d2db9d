//! Timed status effects and their per-turn bookkeeping.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::debug;

use super::types::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffect {
    Poisoned {
        damage_per_turn: u32,
        turns_remaining: u32,
    },
    /// Skips the affected character's next action
    Frozen { turns_remaining: u32 },
    /// Flat damage bonus consumed one charge per attack
    Strengthened { bonus: u32, attacks_remaining: u32 },
}

impl StatusEffect {
    pub fn poison() -> Self {
        StatusEffect::Poisoned {
            damage_per_turn: POISON_DAMAGE_PER_TURN,
            turns_remaining: POISON_DURATION_TURNS,
        }
    }

    pub fn freeze() -> Self {
        StatusEffect::Frozen {
            turns_remaining: FREEZE_TURNS_SKIPPED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusEffect::Poisoned { .. } => "poisoned",
            StatusEffect::Frozen { .. } => "frozen",
            StatusEffect::Strengthened { .. } => "strengthened",
        }
    }

    pub fn is_expired(&self) -> bool {
        match *self {
            StatusEffect::Poisoned {
                turns_remaining, ..
            }
            | StatusEffect::Frozen { turns_remaining } => turns_remaining == 0,
            StatusEffect::Strengthened {
                attacks_remaining, ..
            } => attacks_remaining == 0,
        }
    }
}

/// What happened when a character's turn began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnStart {
    pub poison_damage: u32,
    /// True when a freeze made the character lose this action
    pub skipped: bool,
}

impl Character {
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.iter().any(|effect| effect.name() == name)
    }

    /// Applies an effect, replacing any active effect of the same kind.
    pub fn add_effect(&mut self, effect: StatusEffect) {
        self.effects
            .retain(|active| mem::discriminant(active) != mem::discriminant(&effect));
        debug!(character = %self.name, effect = effect.name(), "status applied");
        self.effects.push(effect);
    }

    /// Drops effects and cooldowns when an encounter ends.
    pub(crate) fn reset_combat_state(&mut self) {
        self.effects.clear();
        self.ability_cooldown = 0;
    }

    /// Ticks poison, freeze and the ability cooldown at the start of this
    /// character's turn.
    pub fn begin_turn(&mut self) -> TurnStart {
        let mut start = TurnStart::default();
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);

        for effect in &mut self.effects {
            match effect {
                StatusEffect::Poisoned {
                    damage_per_turn,
                    turns_remaining,
                } if *turns_remaining > 0 => {
                    start.poison_damage = start.poison_damage.saturating_add(*damage_per_turn);
                    *turns_remaining -= 1;
                }
                StatusEffect::Frozen { turns_remaining } if *turns_remaining > 0 => {
                    start.skipped = true;
                    *turns_remaining -= 1;
                }
                _ => {}
            }
        }
        self.effects.retain(|effect| !effect.is_expired());

        start.poison_damage = self.apply_damage(start.poison_damage);
        if self.is_defeated() {
            start.skipped = true;
        }
        start
    }

    pub(crate) fn strength_bonus(&self) -> u32 {
        self.effects
            .iter()
            .map(|effect| match *effect {
                StatusEffect::Strengthened {
                    bonus,
                    attacks_remaining,
                } if attacks_remaining > 0 => bonus,
                _ => 0,
            })
            .fold(0, u32::saturating_add)
    }

    pub(crate) fn consume_strength_charge(&mut self) {
        for effect in &mut self.effects {
            if let StatusEffect::Strengthened {
                attacks_remaining, ..
            } = effect
            {
                *attacks_remaining = attacks_remaining.saturating_sub(1);
            }
        }
        self.effects.retain(|effect| !effect.is_expired());
    }
}
