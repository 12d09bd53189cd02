use thiserror::Error;

/// Malformed domain input, raised before any state changes. Stale or
/// misaddressed actions are not errors; they are logged no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs at least 2 seats, got {0}")]
    InvalidPlayerCount(usize),
    #[error("crime references cards outside the active skin")]
    InvalidCrime,
    #[error("shared card must come from the discloser's hand and the guessed triple")]
    InvalidShare,
    #[error("skin has an empty card list")]
    EmptySkin,
}
