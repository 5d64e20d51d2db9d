//! Turn-based encounters between the player's party and opponents.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
