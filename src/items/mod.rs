//! Item system: types, the standard catalog, and inventories.

pub mod catalog;
pub mod inventory;
pub mod types;

pub use inventory::*;
pub use types::*;
