use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character::Player;
use crate::core::constants::SAVE_FORMAT_VERSION;

use super::store::SaveError;

/// Serialization view of a game in progress: plain data with items
/// referenced by id, so it round-trips through any serde format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    /// Unix timestamp (seconds)
    pub saved_at: i64,
    pub player: Player,
}

impl GameSnapshot {
    pub fn capture(player: &Player) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            saved_at: Utc::now().timestamp(),
            player: player.clone(),
        }
    }

    /// Turns the snapshot back into a live player, rejecting unknown
    /// versions and stats that break the character invariants.
    pub fn restore(self) -> Result<Player, SaveError> {
        if self.version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        self.player
            .check_invariants()
            .map_err(|e| SaveError::Corrupted(e.to_string()))?;
        Ok(self.player)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, SaveError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SaveError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn saved_at_display(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.saved_at, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// What a save slot holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Occupied {
        player_name: String,
        level: u32,
        saved_at: i64,
    },
    Corrupted,
}

impl SlotStatus {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        SlotStatus::Occupied {
            player_name: snapshot.player.name().to_string(),
            level: snapshot.player.character().level(),
            saved_at: snapshot.saved_at,
        }
    }
}
