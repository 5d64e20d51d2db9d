//! Integration test: Save Slots
//!
//! A player taken through a real encounter is saved to disk, reloaded, and
//! must come back identical, including equip slots, the sidekick, and
//! quest progress.

use std::fs;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rpg_adventure::character::{roster, Player};
use rpg_adventure::combat::{Encounter, EncounterState, PlayerAction};
use rpg_adventure::core::GameConfig;
use rpg_adventure::items::catalog;
use rpg_adventure::persistence::{GameSnapshot, JsonSaveStore, SaveError, SaveStore, SlotStatus};
use rpg_adventure::quests::data;

fn veteran() -> Player {
    let config = GameConfig {
        crit_chance: 0.0,
        ..Default::default()
    };
    let mut player = Player::new("Aria", &config).unwrap();
    player.character_mut().equip(catalog::paper()).unwrap();
    player.character_mut().equip(catalog::leather_armor()).unwrap();
    player
        .character_mut()
        .inventory_mut()
        .add_item(catalog::strength_potion());
    player
        .recruit_sidekick(roster::sidekick("Pip", 40).unwrap())
        .unwrap();
    for quest in data::starter_quests() {
        player.accept_quest(quest);
    }

    let mut encounter =
        Encounter::new(player, vec![roster::goblin_king().unwrap()], &config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    while !encounter.state().is_terminal() {
        encounter
            .take_turn(PlayerAction::Attack { target: 0 }, &mut rng)
            .unwrap();
    }
    assert_eq!(encounter.state(), EncounterState::PlayerWon);
    encounter.finish().player
}

// =========================================================================
// File-backed round trip
// =========================================================================

#[test]
fn test_saved_player_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonSaveStore::new(dir.path());
    let player = veteran();

    store.save(1, &GameSnapshot::capture(&player)).unwrap();
    let restored = store.load(1).unwrap().restore().unwrap();

    assert_eq!(restored, player);
    assert_eq!(restored.character().level(), 2);
    assert_eq!(restored.sidekick().map(|s| s.name()), Some("Pip"));
    assert_eq!(
        restored.character().equipped_weapon().map(|w| w.id),
        player.character().equipped_weapon().map(|w| w.id)
    );
    assert_eq!(restored.character().defense(), 1);
    assert!(restored
        .quest("Goblin King Bounty")
        .is_some_and(|q| q.all_objectives_complete()));
    assert_eq!(
        restored.quest("Hero's Journey").map(|q| q.progress_lines()),
        Some(vec![
            "Defeat Goblin King: 1/1".to_string(),
            "Defeat Dark Sorcerer: 0/1".to_string()
        ])
    );
}

#[test]
fn test_slots_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonSaveStore::new(dir.path());

    let rookie = Player::new("Bram", &GameConfig::default()).unwrap();
    store.save(1, &GameSnapshot::capture(&veteran())).unwrap();
    store.save(3, &GameSnapshot::capture(&rookie)).unwrap();

    let slots = store.list_slots();
    assert!(matches!(
        &slots[0].1,
        SlotStatus::Occupied { player_name, level: 2, .. } if player_name == "Aria"
    ));
    assert_eq!(slots[1].1, SlotStatus::Empty);
    assert!(matches!(
        &slots[2].1,
        SlotStatus::Occupied { player_name, level: 1, .. } if player_name == "Bram"
    ));

    assert!(store.delete(1).unwrap());
    assert_eq!(store.list_slots()[0].1, SlotStatus::Empty);
    assert_eq!(store.load(3).unwrap().player.name(), "Bram");
}

// =========================================================================
// Damaged and missing saves
// =========================================================================

#[test]
fn test_tampered_file_is_reported_corrupted() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonSaveStore::new(dir.path());
    store.save(2, &GameSnapshot::capture(&veteran())).unwrap();

    let path = store.slot_path(2);
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 40;
    bytes[last] ^= 0x20;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(store.load(2), Err(SaveError::Corrupted(_))));
    assert_eq!(store.list_slots()[1].1, SlotStatus::Corrupted);
}

#[test]
fn test_missing_and_invalid_slots() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonSaveStore::new(dir.path().join("never-created"));

    assert!(matches!(store.load(1), Err(SaveError::NotFound(1))));
    assert!(matches!(store.load(9), Err(SaveError::InvalidSlot(9))));
    assert!(!store.delete(2).unwrap());
    assert!(store
        .list_slots()
        .iter()
        .all(|(_, status)| *status == SlotStatus::Empty));
}
