use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of an item. Equip slots and quest rewards refer to items
/// by id; the inventory owns the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Treasure,
}

impl ItemCategory {
    /// Returns the display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Potion => "Potion",
            ItemCategory::Treasure => "Treasure",
        }
    }

    /// Categories that occupy an equip slot.
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemCategory::Weapon | ItemCategory::Armor)
    }
}

/// Combat type of a weapon: rock beats scissors, scissors beats paper,
/// paper beats rock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Rock,
    Paper,
    Scissors,
}

impl WeaponType {
    pub fn beats(self, other: WeaponType) -> bool {
        matches!(
            (self, other),
            (WeaponType::Rock, WeaponType::Scissors)
                | (WeaponType::Scissors, WeaponType::Paper)
                | (WeaponType::Paper, WeaponType::Rock)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponType::Rock => "rock",
            WeaponType::Paper => "paper",
            WeaponType::Scissors => "scissors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionEffect {
    Healing { amount: u32 },
    /// Flat damage bonus for the next `attacks` attacks
    Strength { bonus: u32, attacks: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon {
        damage_bonus: u32,
        weapon_type: WeaponType,
    },
    Armor {
        defense: u32,
    },
    Potion(PotionEffect),
    Treasure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub value: u32,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: u32,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: description.into(),
            value,
            kind,
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        description: impl Into<String>,
        damage_bonus: u32,
        weapon_type: WeaponType,
    ) -> Self {
        Self::new(
            name,
            description,
            damage_bonus.saturating_mul(10),
            ItemKind::Weapon {
                damage_bonus,
                weapon_type,
            },
        )
    }

    pub fn armor(name: impl Into<String>, description: impl Into<String>, defense: u32) -> Self {
        Self::new(name, description, defense.saturating_mul(15), ItemKind::Armor { defense })
    }

    pub fn potion(
        name: impl Into<String>,
        description: impl Into<String>,
        effect: PotionEffect,
    ) -> Self {
        Self::new(name, description, 25, ItemKind::Potion(effect))
    }

    pub fn treasure(name: impl Into<String>, description: impl Into<String>, value: u32) -> Self {
        Self::new(name, description, value, ItemKind::Treasure)
    }

    pub fn category(&self) -> ItemCategory {
        match self.kind {
            ItemKind::Weapon { .. } => ItemCategory::Weapon,
            ItemKind::Armor { .. } => ItemCategory::Armor,
            ItemKind::Potion(_) => ItemCategory::Potion,
            ItemKind::Treasure => ItemCategory::Treasure,
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Potion(_))
    }

    /// Damage added to attacks while equipped (0 for non-weapons).
    pub fn damage_bonus(&self) -> u32 {
        match self.kind {
            ItemKind::Weapon { damage_bonus, .. } => damage_bonus,
            _ => 0,
        }
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        match self.kind {
            ItemKind::Weapon { weapon_type, .. } => Some(weapon_type),
            _ => None,
        }
    }

    pub fn defense(&self) -> u32 {
        match self.kind {
            ItemKind::Armor { defense } => defense,
            _ => 0,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Weapon {
                damage_bonus,
                weapon_type,
            } => write!(f, "{} (+{} {})", self.name, damage_bonus, weapon_type.name()),
            _ => write!(f, "{} ({})", self.name, self.category().name()),
        }
    }
}
