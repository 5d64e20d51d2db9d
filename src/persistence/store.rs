use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::constants::{SAVE_SLOT_COUNT, SAVE_VERSION_MAGIC};

use super::snapshot::{GameSnapshot, SlotStatus};

const MAGIC_LEN: usize = 8;
const LENGTH_LEN: usize = 4;
const CHECKSUM_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save slot {0} is empty")]
    NotFound(u32),

    #[error("save slot {0} does not exist")]
    InvalidSlot(u32),

    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("save data is corrupted: {0}")]
    Corrupted(String),

    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
}

pub fn check_slot(slot: u32) -> Result<(), SaveError> {
    if (1..=SAVE_SLOT_COUNT).contains(&slot) {
        Ok(())
    } else {
        Err(SaveError::InvalidSlot(slot))
    }
}

/// Where snapshots live between sessions.
pub trait SaveStore {
    fn save(&mut self, slot: u32, snapshot: &GameSnapshot) -> Result<(), SaveError>;

    /// Fails with [`SaveError::NotFound`] for an empty slot.
    fn load(&self, slot: u32) -> Result<GameSnapshot, SaveError>;

    /// Returns false if the slot was already empty.
    fn delete(&mut self, slot: u32) -> Result<bool, SaveError>;

    fn list_slots(&self) -> Vec<(u32, SlotStatus)> {
        (1..=SAVE_SLOT_COUNT)
            .map(|slot| {
                // A slot only counts as occupied if it would restore.
                let checked = self.load(slot).and_then(|snapshot| {
                    let status = SlotStatus::from_snapshot(&snapshot);
                    snapshot.restore().map(|_| status)
                });
                let status = match checked {
                    Ok(status) => status,
                    Err(SaveError::NotFound(_)) => SlotStatus::Empty,
                    Err(e) => {
                        warn!(slot, error = %e, "unreadable save slot");
                        SlotStatus::Corrupted
                    }
                };
                (slot, status)
            })
            .collect()
    }
}

/// Encodes a snapshot as a checksummed save file.
///
/// File format:
/// - Version magic (8 bytes, little-endian)
/// - Payload length (4 bytes, little-endian)
/// - JSON payload (variable length)
/// - SHA-256 over magic + length + payload (32 bytes)
pub fn encode(snapshot: &GameSnapshot) -> Result<Vec<u8>, SaveError> {
    let payload = serde_json::to_vec(snapshot)?;
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| SaveError::Corrupted(format!("payload of {} bytes", payload.len())))?;

    let mut bytes = Vec::with_capacity(MAGIC_LEN + LENGTH_LEN + payload.len() + CHECKSUM_LEN);
    bytes.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&payload_len.to_le_bytes());
    bytes.extend_from_slice(&payload);

    let checksum = Sha256::digest(&bytes);
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

/// Verifies and decodes bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<GameSnapshot, SaveError> {
    let header_len = MAGIC_LEN + LENGTH_LEN;
    if bytes.len() < header_len + CHECKSUM_LEN {
        return Err(SaveError::Corrupted(format!(
            "file is too short ({} bytes)",
            bytes.len()
        )));
    }

    let (magic_bytes, rest) = bytes.split_at(MAGIC_LEN);
    let (length_bytes, rest) = rest.split_at(LENGTH_LEN);
    let magic = u64::from_le_bytes(to_array(magic_bytes)?);
    if magic != SAVE_VERSION_MAGIC {
        return Err(SaveError::Corrupted(format!(
            "invalid save version: expected 0x{SAVE_VERSION_MAGIC:016X}, got 0x{magic:016X}"
        )));
    }

    let payload_len = u32::from_le_bytes(to_array(length_bytes)?) as usize;
    if rest.len() != payload_len + CHECKSUM_LEN {
        return Err(SaveError::Corrupted(format!(
            "payload length {payload_len} does not match file size"
        )));
    }
    let (payload, stored_checksum) = rest.split_at(payload_len);

    let computed = Sha256::digest(&bytes[..header_len + payload_len]);
    if stored_checksum != computed.as_slice() {
        return Err(SaveError::Corrupted("checksum verification failed".into()));
    }

    Ok(serde_json::from_slice(payload)?)
}

fn to_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N], SaveError> {
    bytes
        .try_into()
        .map_err(|_| SaveError::Corrupted("truncated header".into()))
}

/// One checksummed file per slot in a directory.
#[derive(Debug, Clone)]
pub struct JsonSaveStore {
    dir: PathBuf,
}

impl JsonSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the platform data directory, e.g. `~/.local/share/rpg-adventure`.
    pub fn default_location() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "rpg-adventure").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine data directory",
            )
        })?;
        Ok(Self::new(project_dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.dir.join(format!("save_{slot}.dat"))
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, slot: u32, snapshot: &GameSnapshot) -> Result<(), SaveError> {
        check_slot(slot)?;
        let bytes = encode(snapshot)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);
        fs::write(&path, bytes)?;
        info!(slot, path = %path.display(), player = %snapshot.player.name(), "game saved");
        Ok(())
    }

    fn load(&self, slot: u32) -> Result<GameSnapshot, SaveError> {
        check_slot(slot)?;
        let path = self.slot_path(slot);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SaveError::NotFound(slot)),
            Err(e) => return Err(e.into()),
        };
        let snapshot = decode(&bytes).inspect_err(|e| {
            warn!(slot, path = %path.display(), error = %e, "failed to load save");
        })?;
        info!(slot, player = %snapshot.player.name(), "game loaded");
        Ok(snapshot)
    }

    fn delete(&mut self, slot: u32) -> Result<bool, SaveError> {
        check_slot(slot)?;
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => {
                info!(slot, "save deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store holding the same encoded bytes a file would.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slots: BTreeMap<u32, Vec<u8>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of a slot, for inspecting or damaging a save.
    pub fn raw_mut(&mut self, slot: u32) -> Option<&mut Vec<u8>> {
        self.slots.get_mut(&slot)
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, slot: u32, snapshot: &GameSnapshot) -> Result<(), SaveError> {
        check_slot(slot)?;
        self.slots.insert(slot, encode(snapshot)?);
        Ok(())
    }

    fn load(&self, slot: u32) -> Result<GameSnapshot, SaveError> {
        check_slot(slot)?;
        let bytes = self.slots.get(&slot).ok_or(SaveError::NotFound(slot))?;
        decode(bytes)
    }

    fn delete(&mut self, slot: u32) -> Result<bool, SaveError> {
        check_slot(slot)?;
        Ok(self.slots.remove(&slot).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Player;
    use crate::core::GameConfig;
    use crate::items::catalog;

    fn snapshot(name: &str) -> GameSnapshot {
        let mut player = Player::new(name, &GameConfig::default()).unwrap();
        player.character_mut().equip(catalog::sword()).unwrap();
        GameSnapshot::capture(&player)
    }

    #[test]
    fn test_encode_layout() {
        let snap = snapshot("Aria");
        let bytes = encode(&snap).unwrap();
        assert_eq!(&bytes[..8], &SAVE_VERSION_MAGIC.to_le_bytes());
        let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
        assert_eq!(bytes.len(), 8 + 4 + len + 32);
        assert_eq!(decode(&bytes).unwrap(), snap);
    }

    #[test]
    fn test_decode_detects_tampering() {
        let mut bytes = encode(&snapshot("Aria")).unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xFF;
        assert!(matches!(decode(&bytes), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_decode_rejects_bad_magic_and_truncation() {
        let mut bytes = encode(&snapshot("Aria")).unwrap();
        bytes[0] ^= 0x01;
        assert!(matches!(decode(&bytes), Err(SaveError::Corrupted(_))));

        let bytes = encode(&snapshot("Aria")).unwrap();
        assert!(matches!(
            decode(&bytes[..bytes.len() - 1]),
            Err(SaveError::Corrupted(_))
        ));
        assert!(matches!(decode(&[1, 2, 3]), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_slots_are_bounded() {
        let mut store = MemorySaveStore::new();
        assert!(check_slot(1).is_ok());
        assert!(check_slot(SAVE_SLOT_COUNT).is_ok());
        assert!(matches!(
            store.save(0, &snapshot("Aria")),
            Err(SaveError::InvalidSlot(0))
        ));
        assert!(matches!(store.load(4), Err(SaveError::InvalidSlot(4))));
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemorySaveStore::new();
        assert!(matches!(store.load(1), Err(SaveError::NotFound(1))));

        store.save(1, &snapshot("Aria")).unwrap();
        assert_eq!(store.load(1).unwrap().player.name(), "Aria");

        assert!(store.delete(1).unwrap());
        assert!(!store.delete(1).unwrap());
        assert!(matches!(store.load(1), Err(SaveError::NotFound(1))));
    }

    #[test]
    fn test_list_slots_reports_each_state() {
        let mut store = MemorySaveStore::new();
        store.save(1, &snapshot("Aria")).unwrap();
        store.save(3, &snapshot("Bram")).unwrap();
        if let Some(raw) = store.raw_mut(3) {
            raw.truncate(10);
        }

        let slots = store.list_slots();
        assert_eq!(slots.len(), 3);
        assert!(matches!(
            &slots[0],
            (1, SlotStatus::Occupied { player_name, level: 1, .. }) if player_name == "Aria"
        ));
        assert_eq!(slots[1], (2, SlotStatus::Empty));
        assert_eq!(slots[2], (3, SlotStatus::Corrupted));
    }

    #[test]
    fn test_list_slots_flags_snapshots_that_would_not_restore() {
        let mut store = MemorySaveStore::new();

        let mut future = snapshot("Aria");
        future.version += 1;
        store.save(1, &future).unwrap();

        let mut value = snapshot("Bram").to_value().unwrap();
        value["player"]["hero"]["level"] = serde_json::json!(99);
        store.save(2, &GameSnapshot::from_value(value).unwrap()).unwrap();

        store.save(3, &snapshot("Cora")).unwrap();

        assert!(matches!(
            store.load(1).unwrap().restore(),
            Err(SaveError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            store.load(2).unwrap().restore(),
            Err(SaveError::Corrupted(_))
        ));
        let slots = store.list_slots();
        assert_eq!(slots[0], (1, SlotStatus::Corrupted));
        assert_eq!(slots[1], (2, SlotStatus::Corrupted));
        assert!(matches!(
            &slots[2],
            (3, SlotStatus::Occupied { player_name, .. }) if player_name == "Cora"
        ));
    }

    #[test]
    fn test_json_store_writes_one_file_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSaveStore::new(dir.path().join("saves"));

        store.save(2, &snapshot("Aria")).unwrap();
        assert!(store.slot_path(2).exists());
        assert!(!store.slot_path(1).exists());
        assert_eq!(store.load(2).unwrap().player.name(), "Aria");
        assert!(matches!(store.load(1), Err(SaveError::NotFound(1))));

        fs::write(store.slot_path(1), b"not a save").unwrap();
        assert!(matches!(store.load(1), Err(SaveError::Corrupted(_))));

        assert!(store.delete(2).unwrap());
        assert!(!store.slot_path(2).exists());
    }
}
