use super::types::{Item, ItemCategory, ItemId};
use crate::core::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A bounded, ordered bag of items plus the equip slots.
///
/// Equipped items stay in `items`; a slot only records which item id is
/// worn, so equipping never changes the item count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    max_slots: usize,
    items: Vec<Item>,
    equipped: BTreeMap<ItemCategory, ItemId>,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            max_slots,
            items: Vec::new(),
            equipped: BTreeMap::new(),
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_slots
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots.saturating_sub(self.items.len())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Adds an item, failing with `CapacityExceeded` when every slot is used.
    pub fn try_add_item(&mut self, item: Item) -> GameResult<ItemId> {
        if self.is_full() {
            warn!(item = %item.name, max_slots = self.max_slots, "inventory full");
            return Err(GameError::CapacityExceeded(format!(
                "inventory is full ({} slots), cannot add {}",
                self.max_slots, item.name
            )));
        }
        let id = item.id;
        debug!(item = %item.name, "item added");
        self.items.push(item);
        Ok(id)
    }

    /// Returns false (and leaves the inventory unchanged) when full.
    pub fn add_item(&mut self, item: Item) -> bool {
        self.try_add_item(item).is_ok()
    }

    /// Removes and returns an item, unequipping it first if worn.
    pub fn take_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.equipped.retain(|_, equipped| *equipped != id);
        Some(self.items.remove(index))
    }

    pub fn remove_item(&mut self, id: ItemId) -> bool {
        self.take_item(id).is_some()
    }

    /// Equips an item already held in the inventory. Any item previously in
    /// the same slot stays in the inventory, unequipped.
    pub fn equip_item(&mut self, id: ItemId) -> bool {
        let Some(item) = self.get(id) else {
            return false;
        };
        let category = item.category();
        if !category.is_equippable() {
            debug!(item = %item.name, category = category.name(), "not equippable");
            return false;
        }
        debug!(item = %item.name, slot = category.name(), "item equipped");
        self.equipped.insert(category, id);
        true
    }

    pub fn unequip(&mut self, category: ItemCategory) -> Option<ItemId> {
        self.equipped.remove(&category)
    }

    pub fn is_equipped(&self, id: ItemId) -> bool {
        self.equipped.values().any(|equipped| *equipped == id)
    }

    pub fn equipped(&self, category: ItemCategory) -> Option<&Item> {
        self.equipped.get(&category).and_then(|id| self.get(*id))
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.equipped(ItemCategory::Weapon)
    }

    pub fn equipped_armor(&self) -> Option<&Item> {
        self.equipped(ItemCategory::Armor)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        self.equipped.values().filter_map(|id| self.get(*id))
    }

    /// Slots that point at an item this inventory does not hold, or at one
    /// of the wrong category.
    pub fn broken_slots(&self) -> Vec<ItemCategory> {
        self.equipped
            .iter()
            .filter(|(category, id)| {
                self.get(**id)
                    .map_or(true, |item| item.category() != **category)
            })
            .map(|(category, _)| *category)
            .collect()
    }

    /// Removes a consumable so its effect can be applied. Fails with
    /// `NotFound` for unknown ids and `InvalidOperation` for equipment.
    pub fn take_consumable(&mut self, id: ItemId) -> GameResult<Item> {
        let item = self
            .get(id)
            .ok_or_else(|| GameError::NotFound(format!("item {id} is not in the inventory")))?;
        if !item.is_consumable() {
            return Err(GameError::InvalidOperation(format!(
                "{} ({}) cannot be consumed",
                item.name,
                item.category().name()
            )));
        }
        self.take_item(id)
            .ok_or_else(|| GameError::NotFound(format!("item {id} is not in the inventory")))
    }
}
