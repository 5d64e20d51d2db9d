//! Save slots: the snapshot view of a game and the stores that keep it.

pub mod snapshot;
pub mod store;

pub use snapshot::{GameSnapshot, SlotStatus};
pub use store::{JsonSaveStore, MemorySaveStore, SaveError, SaveStore};
