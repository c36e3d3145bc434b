use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown level {0:?}, expected one of easy, medium, hard, ridiculous")]
    InvalidLevel(String),
    #[error("Board size must be at least 1")]
    InvalidBoardSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;
