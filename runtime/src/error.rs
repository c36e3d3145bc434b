use mineswept_core::GameError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Game engine is no longer running")]
    Closed,
}

pub type Result<T> = std::result::Result<T, EngineError>;
