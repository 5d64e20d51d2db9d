//! Quest tracking: objectives, rewards and stock quests.

pub mod data;
pub mod types;

pub use types::*;
