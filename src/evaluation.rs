//! Static evaluation strategies used at the leaves of the search

use crate::board::{Board, Side, DIRECTIONS};
use crate::{HEIGHT, RUN_LENGTH, WIDTH};

/// Score of a window holding a complete run
pub const PATTERN_FOUR: i32 = 1000;
/// Score of a window holding all but one tile of a run and an empty cell
pub const PATTERN_THREE: i32 = 100;
/// Score of a window holding half of a run with the rest empty
pub const PATTERN_TWO: i32 = 10;

/// Scores a position for one side, positive values favouring that side
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

/// Rewards tiles with room to grow a run in many directions, and the center
/// column (see [`Board::evaluate`])
#[derive(Copy, Clone, Debug, Default)]
pub struct PotentialEvaluator;

impl Evaluator for PotentialEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        board.evaluate(side)
    }
}

/// Counts partially filled runs
///
/// Every in-bounds window of `RUN_LENGTH` cells scores `PATTERN_FOUR` when it is
/// completely owned by a side, `PATTERN_THREE` when it is missing one tile and
/// the missing cell is empty, and `PATTERN_TWO` when it is half owned and half
/// empty. The result is `side`'s total minus the opponent's.
#[derive(Copy, Clone, Debug, Default)]
pub struct PatternEvaluator;

impl PatternEvaluator {
    fn pattern_score(board: &Board, side: Side) -> i32 {
        let mut score = 0;
        for row in 0..HEIGHT as isize {
            for column in 0..WIDTH as isize {
                for &(d_row, d_column) in DIRECTIONS.iter() {
                    let window = Self::window(board, side, row, column, d_row, d_column);
                    if let Some((owned, empty)) = window {
                        score += match (owned, empty) {
                            (o, _) if o == RUN_LENGTH => PATTERN_FOUR,
                            (o, 1) if o == RUN_LENGTH - 1 => PATTERN_THREE,
                            (o, e) if o == RUN_LENGTH / 2 && e == RUN_LENGTH - o => PATTERN_TWO,
                            _ => 0,
                        };
                    }
                }
            }
        }
        score
    }

    // counts tiles of `side` and empty cells in the window, None if it leaves the board
    fn window(
        board: &Board,
        side: Side,
        row: isize,
        column: isize,
        d_row: isize,
        d_column: isize,
    ) -> Option<(usize, usize)> {
        let (mut owned, mut empty) = (0, 0);
        for i in 0..RUN_LENGTH as isize {
            let (r, c) = (row + d_row * i, column + d_column * i);
            if r < 0 || r >= HEIGHT as isize || c < 0 || c >= WIDTH as isize {
                return None;
            }
            match board.cell(r as usize, c as usize) {
                Some(owner) if owner == side => owned += 1,
                None => empty += 1,
                Some(_) => {}
            }
        }
        Some((owned, empty))
    }
}

impl Evaluator for PatternEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        Self::pattern_score(board, side) - Self::pattern_score(board, side.opponent())
    }
}
