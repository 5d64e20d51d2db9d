//! Error taxonomy shared by the character, inventory, quest and combat code.

use thiserror::Error;

/// Errors raised by game operations.
///
/// Boundary checks on owned collections (inventory slots, quest objective
/// indices) report failure through `bool` returns instead; these variants are
/// for caller bugs and for operations whose reason matters to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}

pub type GameResult<T> = Result<T, GameError>;

/// Converts a caller-supplied amount into an unsigned stat delta.
pub(crate) fn non_negative(amount: i32, what: &str) -> GameResult<u32> {
    u32::try_from(amount)
        .map_err(|_| GameError::InvalidArgument(format!("{what} must be >= 0, got {amount}")))
}
