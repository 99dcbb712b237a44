//! Error types for board and search operations

use std::fmt;

use crate::WIDTH;

/// Error type for rejected placements and unparseable move strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The column has no empty cell left
    ColumnFull { column: usize },
    /// The column index is outside the board
    InvalidColumnIndex { column: usize },
    /// A move string contained something other than a column digit
    InvalidMoveCharacter { found: char },
    /// A move was given after the game had already been decided
    GameOver,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ColumnFull { column } => {
                write!(f, "Invalid move, column {} full", column)
            }
            BoardError::InvalidColumnIndex { column } => write!(
                f,
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                WIDTH - 1
            ),
            BoardError::InvalidMoveCharacter { found } => {
                write!(f, "could not parse '{}' as a valid move", found)
            }
            BoardError::GameOver => write!(f, "Invalid position, game is over"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Error type for move selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Every column is full
    NoLegalMove,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMove => write!(f, "no legal move, the board is full"),
        }
    }
}

impl std::error::Error for SearchError {}
