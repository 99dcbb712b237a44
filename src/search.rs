//! A depth-limited minimax agent for Connect 4

use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    board::{Board, Side},
    error::SearchError,
    evaluation::{Evaluator, PotentialEvaluator},
    WIDTH, WIN_SCORE,
};

/// Returns the columns ordered from the middle outwards, as
/// the middle columns are often better moves
pub const fn move_order() -> [usize; WIDTH] {
    let mut move_order = [0; WIDTH];
    let mut i = 0;
    while i < WIDTH {
        move_order[i] = (WIDTH / 2) + (1 - i % 2) * (i / 2) - (i % 2) * (i / 2 + 1);
        i += 1;
    }
    move_order
}

/// An agent choosing moves for one side of a Connect 4 game
///
/// # Notes
/// The agent looks a fixed number of plies ahead. It maximises the score on its own
/// turns and assumes the opponent minimises it. Positions where the search stops are
/// scored with an [`Evaluator`], except for won positions, which score `WIN_SCORE`
/// for the agent's side and `-WIN_SCORE` for the opponent regardless of depth.
///
/// The board is borrowed mutably for the duration of a search: every move tried is
/// placed on it and retracted again, so it is left exactly as it was given.
#[derive(Clone)]
pub struct Searcher<E = PotentialEvaluator> {
    side: Side,
    evaluator: E,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` playing `side`, scoring positions with the
    /// potential heuristic
    pub fn new(side: Side) -> Self {
        Self::with_evaluator(side, PotentialEvaluator)
    }
}

impl<E: Evaluator> Searcher<E> {
    /// Creates a new `Searcher` playing `side` with a custom evaluation
    pub fn with_evaluator(side: Side, evaluator: E) -> Self {
        Self {
            side,
            evaluator,
            node_count: 0,
        }
    }

    /// The side this agent plays (the maximising side)
    pub fn side(&self) -> Side {
        self.side
    }

    fn mover(&self, maximizing: bool) -> Side {
        if maximizing {
            self.side
        } else {
            self.side.opponent()
        }
    }

    /// Returns the score of a position where the search stops, or `None` if
    /// the search should go deeper
    fn leaf_score(&self, board: &Board, depth: usize) -> Option<i32> {
        match board.winner() {
            Some(winner) if winner == self.side => Some(WIN_SCORE),
            Some(_) => Some(-WIN_SCORE),
            None if depth == 0 || board.is_full() => {
                Some(self.evaluator.evaluate(board, self.side))
            }
            None => None,
        }
    }

    /// Performs minimax search with alpha-beta pruning
    ///
    /// Returns the score of the position for this agent's side, searching `depth`
    /// plies with `maximizing` deciding whose turn it is. A score outside of
    /// `alpha..beta` is only a bound on the true score.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        if let Some(score) = self.leaf_score(board, depth) {
            return score;
        }

        let side = self.mover(maximizing);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for column in 0..WIDTH {
            // full columns are skipped, the guard retracts the tile on every exit
            let mut child = match board.place_scoped(column, side) {
                Ok(child) => child,
                Err(_) => continue,
            };
            let score = self.search(&mut *child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            // neither player will let the game reach the remaining columns
            if beta <= alpha {
                trace!("cut-off at depth {} after column {}", depth, column);
                break;
            }
        }
        best
    }

    /// Performs plain minimax search without pruning
    ///
    /// Always returns the exact score, the same as [`Searcher::search`] with an
    /// unbounded window, but visits every node.
    pub fn minimax(&mut self, board: &mut Board, depth: usize, maximizing: bool) -> i32 {
        self.node_count += 1;

        if let Some(score) = self.leaf_score(board, depth) {
            return score;
        }

        let side = self.mover(maximizing);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for column in 0..WIDTH {
            let mut child = match board.place_scoped(column, side) {
                Ok(child) => child,
                Err(_) => continue,
            };
            let score = self.minimax(&mut *child, depth - 1, !maximizing);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    /// Calculates the best move for this agent's side, looking `depth` plies ahead
    ///
    /// Returns the score of the position and the chosen column. Columns are tried
    /// from the middle outwards and a later column only replaces the best one with
    /// a strictly higher score, so ties go to the more central column.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        depth: usize,
    ) -> Result<(i32, usize), SearchError> {
        self.select(board, depth, |searcher, board, depth| {
            searcher.search(board, depth, i32::MIN, i32::MAX, false)
        })
    }

    /// Calculates the best move like [`Searcher::choose_move`] using plain minimax
    pub fn choose_move_minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
    ) -> Result<(i32, usize), SearchError> {
        self.select(board, depth, |searcher, board, depth| {
            searcher.minimax(board, depth, false)
        })
    }

    fn select<F>(
        &mut self,
        board: &mut Board,
        depth: usize,
        mut score_child: F,
    ) -> Result<(i32, usize), SearchError>
    where
        F: FnMut(&mut Self, &mut Board, usize) -> i32,
    {
        let side = self.side;
        let mut best = None;
        for &column in move_order().iter() {
            let mut child = match board.place_scoped(column, side) {
                Ok(child) => child,
                Err(_) => continue,
            };
            let score = score_child(self, &mut *child, depth.saturating_sub(1));
            debug!("column {} scored {}", column, score);

            best = pick_better(best, score, column);
        }
        self.report(best)
    }

    fn report(&self, best: Option<(i32, usize)>) -> Result<(i32, usize), SearchError> {
        let (score, column) = best.ok_or(SearchError::NoLegalMove)?;
        debug!(
            "chose column {} with score {} after {} nodes",
            column, score, self.node_count
        );
        Ok((score, column))
    }
}

impl<E: Evaluator + Clone + Send + Sync> Searcher<E> {
    /// Calculates the best move like [`Searcher::choose_move`], searching each
    /// candidate column on its own copy of the board in parallel
    ///
    /// The result is identical to [`Searcher::choose_move`].
    pub fn choose_move_parallel(
        &mut self,
        board: &Board,
        depth: usize,
    ) -> Result<(i32, usize), SearchError> {
        let root = &*self;
        let order = move_order();
        let results: Vec<Option<(i32, usize, usize)>> = order[..]
            .par_iter()
            .map(|&column| {
                let mut next = root.clone();
                next.node_count = 0;

                let mut board = *board;
                board.place(column, root.side).ok()?;
                let score = next.search(
                    &mut board,
                    depth.saturating_sub(1),
                    i32::MIN,
                    i32::MAX,
                    false,
                );
                Some((score, column, next.node_count))
            })
            .collect();

        // reduce in move order so ties are broken the same way as a sequential search
        let mut best = None;
        for (score, column, node_count) in results.into_iter().flatten() {
            debug!("column {} scored {}", column, score);
            self.node_count += node_count;
            best = pick_better(best, score, column);
        }
        self.report(best)
    }
}

// keeps the earlier candidate unless the new score is strictly higher
fn pick_better(best: Option<(i32, usize)>, score: i32, column: usize) -> Option<(i32, usize)> {
    match best {
        Some((best_score, _)) if score <= best_score => best,
        _ => Some((score, column)),
    }
}
