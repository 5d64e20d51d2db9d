//! Role-specific special abilities.
//!
//! Every non-player role has one ability. They differ in formula and side
//! effect but all resolve to the same [`AbilityOutcome`], so the encounter
//! loop can fire them without knowing which role it is driving.

use crate::core::combat_math::{apply_matchup, calculate_damage_taken};
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult};
use tracing::debug;

use super::status::StatusEffect;
use super::types::{Character, Role};

/// What an ability intends to do before the target's armor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityPlan {
    pub damage: u32,
    pub status: Option<StatusEffect>,
    pub extra_action: bool,
}

pub trait SpecialAbility {
    fn name(&self) -> &'static str;

    fn plan(&self, user: &Character, target: &Character) -> AbilityPlan;
}

/// Boss ability: a heavy blow that freezes the target.
#[derive(Debug, Clone, Copy)]
pub struct SpecialAttack {
    pub boss_level: u32,
}

impl SpecialAbility for SpecialAttack {
    fn name(&self) -> &'static str {
        "Special Attack"
    }

    fn plan(&self, user: &Character, target: &Character) -> AbilityPlan {
        let regular = apply_matchup(
            user.base_damage().saturating_add(user.weapon_bonus()),
            user.matchup_against(target),
        );
        AbilityPlan {
            damage: regular
                .saturating_add(BOSS_SPECIAL_BONUS_PER_LEVEL.saturating_mul(self.boss_level)),
            status: Some(StatusEffect::freeze()),
            extra_action: false,
        }
    }
}

/// Villain ability: ignores weapons and poisons the target.
#[derive(Debug, Clone, Copy)]
pub struct DarkPower {
    pub evil_level: u32,
}

impl SpecialAbility for DarkPower {
    fn name(&self) -> &'static str {
        "Dark Power"
    }

    fn plan(&self, user: &Character, _target: &Character) -> AbilityPlan {
        AbilityPlan {
            damage: user.base_damage().saturating_add(self.evil_level),
            status: Some(StatusEffect::poison()),
            extra_action: false,
        }
    }
}

/// Sidekick ability: a loyal strike; very loyal sidekicks buy the hero
/// another action.
#[derive(Debug, Clone, Copy)]
pub struct LoyalStrike {
    pub loyalty: u32,
}

impl SpecialAbility for LoyalStrike {
    fn name(&self) -> &'static str {
        "Loyal Strike"
    }

    fn plan(&self, user: &Character, _target: &Character) -> AbilityPlan {
        AbilityPlan {
            damage: user
                .base_damage()
                .saturating_add(self.loyalty / SIDEKICK_LOYALTY_DAMAGE_DIVISOR),
            status: None,
            extra_action: self.loyalty >= SIDEKICK_EXTRA_ACTION_LOYALTY,
        }
    }
}

impl Role {
    pub fn special_ability(&self) -> Option<Box<dyn SpecialAbility>> {
        match *self {
            Role::Player => None,
            Role::Sidekick { loyalty } => Some(Box::new(LoyalStrike { loyalty })),
            Role::Villain { evil_level } => Some(Box::new(DarkPower { evil_level })),
            Role::Boss { boss_level } => Some(Box::new(SpecialAttack { boss_level })),
        }
    }
}

/// Uniform result of any special ability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityOutcome {
    pub ability: &'static str,
    pub damage: u32,
    pub status_applied: Option<StatusEffect>,
    pub extra_action: bool,
    pub description: String,
}

impl Character {
    pub fn ability_cooldown(&self) -> u32 {
        self.ability_cooldown
    }

    /// True when this character has an ability and it is off cooldown.
    pub fn ability_ready(&self) -> bool {
        self.ability_cooldown == 0 && self.role.special_ability().is_some()
    }

    /// True when the ability will be off cooldown once this character's next
    /// turn begins and `begin_turn` has ticked the cooldown.
    pub fn ability_ready_next_turn(&self) -> bool {
        self.ability_cooldown <= 1 && self.role.special_ability().is_some()
    }

    /// Fires this character's special ability at `target`.
    pub fn use_ability(&mut self, target: &mut Character) -> GameResult<AbilityOutcome> {
        self.ensure_can_act_on(target)?;
        let Some(ability) = self.role.special_ability() else {
            return Err(GameError::InvalidOperation(format!(
                "{} has no special ability",
                self.name
            )));
        };
        if self.ability_cooldown > 0 {
            return Err(GameError::InvalidOperation(format!(
                "{} is on cooldown for {} more turn(s)",
                ability.name(),
                self.ability_cooldown
            )));
        }

        let plan = ability.plan(self, target);
        let damage = target.apply_damage(calculate_damage_taken(plan.damage, target.defense()));
        let status_applied = match plan.status {
            Some(effect) if target.is_alive() => {
                target.add_effect(effect);
                Some(effect)
            }
            _ => None,
        };
        self.ability_cooldown = SPECIAL_ABILITY_COOLDOWN_TURNS;

        let mut description = format!(
            "{} uses {} on {} for {} damage",
            self.name,
            ability.name(),
            target.name,
            damage
        );
        if let Some(effect) = status_applied {
            description.push_str(&format!(", {} is {}", target.name, effect.name()));
        }
        if plan.extra_action {
            description.push_str(", granting an extra action");
        }

        debug!(user = %self.name, ability = ability.name(), damage, "ability used");
        Ok(AbilityOutcome {
            ability: ability.name(),
            damage,
            status_applied,
            extra_action: plan.extra_action,
            description,
        })
    }

    pub fn use_special_attack(&mut self, target: &mut Character) -> GameResult<AbilityOutcome> {
        self.require_role(matches!(self.role, Role::Boss { .. }), "Special Attack")?;
        self.use_ability(target)
    }

    pub fn use_dark_power(&mut self, target: &mut Character) -> GameResult<AbilityOutcome> {
        self.require_role(matches!(self.role, Role::Villain { .. }), "Dark Power")?;
        self.use_ability(target)
    }

    pub fn use_special_ability(&mut self, target: &mut Character) -> GameResult<AbilityOutcome> {
        self.require_role(matches!(self.role, Role::Sidekick { .. }), "Loyal Strike")?;
        self.use_ability(target)
    }

    fn require_role(&self, allowed: bool, ability: &str) -> GameResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(GameError::InvalidOperation(format!(
                "a {} cannot use {ability}",
                self.role.name()
            )))
        }
    }
}
