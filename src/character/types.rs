use crate::core::combat_math::{
    apply_crit, apply_matchup, calculate_damage_taken, weapon_matchup, Matchup,
};
use crate::core::constants::*;
use crate::core::error::{non_negative, GameError, GameResult};
use crate::items::{Inventory, Item, ItemId, ItemKind, PotionEffect};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::status::StatusEffect;

/// What kind of entity a character is. Variants carry the capability tag
/// that drives their special ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Sidekick { loyalty: u32 },
    Villain { evil_level: u32 },
    Boss { boss_level: u32 },
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Player => "Player",
            Role::Sidekick { .. } => "Sidekick",
            Role::Villain { .. } => "Villain",
            Role::Boss { .. } => "Boss",
        }
    }
}

/// Per-level growth of max health and base damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRates {
    pub health_pct: f64,
    pub damage_pct: f64,
}

impl Default for GrowthRates {
    fn default() -> Self {
        Self {
            health_pct: DEFAULT_LEVEL_UP_HEALTH_PCT,
            damage_pct: DEFAULT_LEVEL_UP_DAMAGE_PCT,
        }
    }
}

/// Result of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    /// Damage actually removed from the target's health
    pub damage: u32,
    pub matchup: Matchup,
    pub critical: bool,
}

/// Effect of using a consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    Healed { amount: u32 },
    Strengthened { bonus: u32, attacks: u32 },
}

/// Any animate entity: the hero, a sidekick, a villain or a boss.
///
/// Invariant: `0 <= health <= max_health`. A character at 0 health is
/// defeated and can neither act nor be attacked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub(super) name: String,
    pub(super) role: Role,
    pub(super) health: u32,
    pub(super) max_health: u32,
    pub(super) base_damage: u32,
    pub(super) level: u32,
    pub(super) experience: u32,
    pub(super) inventory: Inventory,
    #[serde(default)]
    pub(super) growth: GrowthRates,
    #[serde(default)]
    pub(super) effects: Vec<StatusEffect>,
    #[serde(default)]
    pub(super) ability_cooldown: u32,
}

impl Character {
    /// Creates a level 1 character at full health.
    pub fn new(
        name: impl Into<String>,
        role: Role,
        max_health: u32,
        base_damage: u32,
    ) -> GameResult<Self> {
        let name = name.into();
        if max_health == 0 {
            return Err(GameError::InvalidArgument(format!(
                "{name} needs max_health > 0"
            )));
        }
        Ok(Self {
            name,
            role,
            health: max_health,
            max_health,
            base_damage,
            level: 1,
            experience: 0,
            inventory: Inventory::new(DEFAULT_MAX_INVENTORY_SLOTS),
            growth: GrowthRates::default(),
            effects: Vec::new(),
            ability_cooldown: 0,
        })
    }

    /// Replaces the (still empty) inventory with one of a different size.
    pub fn with_inventory_slots(mut self, max_slots: usize) -> Self {
        self.inventory = Inventory::new(max_slots);
        self
    }

    pub fn with_growth(mut self, growth: GrowthRates) -> Self {
        self.growth = growth;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn base_damage(&self) -> u32 {
        self.base_damage
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn growth(&self) -> GrowthRates {
        self.growth
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.inventory.equipped_weapon()
    }

    pub fn weapon_bonus(&self) -> u32 {
        self.equipped_weapon().map_or(0, Item::damage_bonus)
    }

    pub fn defense(&self) -> u32 {
        self.inventory.equipped_armor().map_or(0, Item::defense)
    }

    /// Puts a new item in the inventory and equips it.
    pub fn equip(&mut self, item: Item) -> GameResult<ItemId> {
        if !item.category().is_equippable() {
            return Err(GameError::InvalidOperation(format!(
                "{} cannot be equipped",
                item.name
            )));
        }
        let id = self.inventory.try_add_item(item)?;
        self.inventory.equip_item(id);
        Ok(id)
    }

    /// Reduces health by `amount`, clamped at 0. Returns the damage actually
    /// applied, i.e. `min(amount, health_before)`.
    pub fn take_damage(&mut self, amount: i32) -> GameResult<u32> {
        let amount = non_negative(amount, "damage")?;
        Ok(self.apply_damage(amount))
    }

    /// Restores health, clamped at `max_health`. Returns the amount actually
    /// healed, i.e. `min(amount, max_health - health_before)`.
    pub fn heal(&mut self, amount: i32) -> GameResult<u32> {
        let amount = non_negative(amount, "heal amount")?;
        Ok(self.restore_health(amount))
    }

    pub(crate) fn apply_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.health);
        self.health -= applied;
        applied
    }

    pub(crate) fn restore_health(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Damage this character's next regular attack would deal to `target`,
    /// before armor and crits: base damage plus weapon bonus plus any active
    /// strength bonus, scaled by the weapon matchup.
    pub fn attack_damage_against(&self, target: &Character) -> u32 {
        let raw = self
            .base_damage
            .saturating_add(self.weapon_bonus())
            .saturating_add(self.strength_bonus());
        apply_matchup(raw, self.matchup_against(target))
    }

    pub fn matchup_against(&self, target: &Character) -> Matchup {
        weapon_matchup(
            self.equipped_weapon().and_then(Item::weapon_type),
            target.equipped_weapon().and_then(Item::weapon_type),
        )
    }

    /// Attacks `target` and returns the damage applied.
    pub fn attack(&mut self, target: &mut Character) -> GameResult<u32> {
        self.attack_with(target, false).map(|report| report.damage)
    }

    /// Attacks `target`, optionally as a critical hit.
    pub fn attack_with(
        &mut self,
        target: &mut Character,
        critical: bool,
    ) -> GameResult<AttackReport> {
        self.ensure_can_act_on(target)?;

        let matchup = self.matchup_against(target);
        let mut damage = self.attack_damage_against(target);
        self.consume_strength_charge();
        if critical {
            damage = apply_crit(damage);
        }
        let damage = calculate_damage_taken(damage, target.defense());
        let applied = target.apply_damage(damage);

        debug!(
            attacker = %self.name,
            target = %target.name,
            damage = applied,
            matchup = matchup.name(),
            critical,
            "attack"
        );
        Ok(AttackReport {
            damage: applied,
            matchup,
            critical,
        })
    }

    /// Checks the stat invariants on data that did not come through the
    /// constructors, such as a loaded save.
    pub fn check_invariants(&self) -> GameResult<()> {
        if self.max_health == 0 || self.health > self.max_health {
            return Err(GameError::InvalidArgument(format!(
                "{} has health {}/{}",
                self.name, self.health, self.max_health
            )));
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(GameError::InvalidArgument(format!(
                "{} has level {} (expected 1..={MAX_LEVEL})",
                self.name, self.level
            )));
        }
        if self.inventory.len() > self.inventory.max_slots() {
            return Err(GameError::InvalidArgument(format!(
                "{} carries {} items in {} slots",
                self.name,
                self.inventory.len(),
                self.inventory.max_slots()
            )));
        }
        if let Some(slot) = self.inventory.broken_slots().first() {
            return Err(GameError::InvalidArgument(format!(
                "{}'s {} slot points at an item they do not carry",
                self.name,
                slot.name()
            )));
        }
        Ok(())
    }

    pub(crate) fn ensure_can_act_on(&self, target: &Character) -> GameResult<()> {
        if self.is_defeated() {
            return Err(GameError::InvalidOperation(format!(
                "{} is defeated and cannot act",
                self.name
            )));
        }
        if target.is_defeated() {
            return Err(GameError::InvalidOperation(format!(
                "{} is already defeated",
                target.name
            )));
        }
        Ok(())
    }

    /// Consumes a potion from the inventory and applies it to this character.
    pub fn use_item(&mut self, id: ItemId) -> GameResult<ItemUse> {
        if self.is_defeated() {
            return Err(GameError::InvalidOperation(format!(
                "{} is defeated and cannot use items",
                self.name
            )));
        }
        let item = self.inventory.take_consumable(id)?;
        let ItemKind::Potion(effect) = item.kind else {
            return Err(GameError::InvalidOperation(format!(
                "{} cannot be consumed",
                item.name
            )));
        };

        let outcome = match effect {
            PotionEffect::Healing { amount } => ItemUse::Healed {
                amount: self.restore_health(amount),
            },
            PotionEffect::Strength { bonus, attacks } => {
                self.add_effect(StatusEffect::Strengthened {
                    bonus,
                    attacks_remaining: attacks,
                });
                ItemUse::Strengthened { bonus, attacks }
            }
        };
        debug!(character = %self.name, item = %item.name, ?outcome, "item used");
        Ok(outcome)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Level {})", self.name, self.level)
    }
}
