//! A depth-limited game tree search agent for a small Connect 4 board
//!
//! The agent looks a fixed number of plies ahead with minimax and alpha-beta
//! pruning, scoring the leaves with a positional heuristic, and picks the
//! column that is best for the side it plays.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Board, Side}, search::Searcher, DEFAULT_DEPTH};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! board.place(0, Side::PlayerOne)?;
//!
//! let mut searcher = Searcher::new(Side::PlayerTwo);
//! let (_score, best_move) = searcher.choose_move(&mut board, DEFAULT_DEPTH)?;
//!
//! assert_eq!(best_move, 2);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod error;

pub mod evaluation;

pub mod search;


/// The width of the game board in tiles
pub const WIDTH: usize = 5;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The length of a winning run
pub const RUN_LENGTH: usize = 4;

/// The score of a won position for the searching side (negated for a loss)
pub const WIN_SCORE: i32 = 1000;

/// Bonus awarded by the potential heuristic for each tile in the middle column
pub const CENTER_BONUS: i32 = 3;

/// The search depth in plies used when the caller has no preference
pub const DEFAULT_DEPTH: usize = 4;

// a run of four must fit in both directions
const_assert!(WIDTH >= RUN_LENGTH && HEIGHT >= RUN_LENGTH);
// move strings use one decimal digit per column
const_assert!(WIDTH <= 10);
