//! Constants, configuration, errors and shared combat math.

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod error;

pub use config::{ConfigError, GameConfig};
pub use error::{GameError, GameResult};
