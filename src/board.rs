use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::{error::BoardError, CENTER_BONUS, HEIGHT, RUN_LENGTH, WIDTH};

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /// Returns the other player
    pub fn opponent(self) -> Self {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// The marker used when printing the board
    pub fn symbol(self) -> char {
        match self {
            Side::PlayerOne => 'X',
            Side::PlayerTwo => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

// (row, column) steps: right, up, up-right and up-left, with row 0 at the bottom
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Returns the static weight of every cell: one point for each direction in which
/// a full run still fits on the board starting from that cell, plus the center
/// column bonus
const fn cell_weights() -> [i32; WIDTH * HEIGHT] {
    let mut weights = [0; WIDTH * HEIGHT];
    let reach = RUN_LENGTH as isize - 1;
    let mut idx = 0;
    while idx < WIDTH * HEIGHT {
        let row = (idx / WIDTH) as isize;
        let column = (idx % WIDTH) as isize;

        let mut weight = 0;
        let mut direction = 0;
        while direction < DIRECTIONS.len() {
            let end_row = row + DIRECTIONS[direction].0 * reach;
            let end_column = column + DIRECTIONS[direction].1 * reach;
            if end_row >= 0
                && end_row < HEIGHT as isize
                && end_column >= 0
                && end_column < WIDTH as isize
            {
                weight += 1;
            }
            direction += 1;
        }
        if column as usize == WIDTH / 2 {
            weight += CENTER_BONUS;
        }
        weights[idx] = weight;
        idx += 1;
    }
    weights
}

const CELL_WEIGHTS: [i32; WIDTH * HEIGHT] = cell_weights();

/// A `WIDTH` x `HEIGHT` grid where tiles fall to the lowest empty cell of a column
///
/// Placements can be undone with [`Board::retract`], which lets a search explore
/// and restore a single board instead of copying it for every node.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [Option<Side>; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    num_moves: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [None; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
        }
    }

    /// Creates a board by playing a string of 0-indexed column digits,
    /// alternating sides and starting with `Side::PlayerOne`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut side = Side::PlayerOne;

        for column_char in moves.as_ref().chars() {
            let column = column_char
                .to_digit(10)
                .ok_or(BoardError::InvalidMoveCharacter { found: column_char })?
                as usize;
            // abort if the position is won at any point
            if board.winner().is_some() {
                return Err(BoardError::GameOver);
            }
            board.place(column, side)?;
            side = side.opponent();
        }
        Ok(board)
    }

    /// The number of tiles on the board
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The number of tiles in `column`
    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// Whether a tile can be placed in `column`
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The owner of the cell at `row` (counted from the bottom) and `column`
    pub fn cell(&self, row: usize, column: usize) -> Option<Side> {
        self.cells[column + WIDTH * row]
    }

    /// Drops a tile for `side` into `column`
    pub fn place(&mut self, column: usize, side: Side) -> Result<(), BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumnIndex { column });
        }
        if self.heights[column] == HEIGHT {
            return Err(BoardError::ColumnFull { column });
        }
        self.cells[column + WIDTH * self.heights[column]] = Some(side);
        self.heights[column] += 1;
        self.num_moves += 1;
        Ok(())
    }

    /// Drops a tile like [`Board::place`], returning a guard that retracts it
    /// again when dropped
    pub fn place_scoped(
        &mut self,
        column: usize,
        side: Side,
    ) -> Result<Placement<'_>, BoardError> {
        self.place(column, side)?;
        Ok(Placement {
            board: self,
            column,
        })
    }

    /// Removes the top tile of `column`
    ///
    /// # Panics
    /// Panics if `column` is empty: every retraction must undo an earlier placement.
    pub fn retract(&mut self, column: usize) {
        assert!(
            self.heights[column] > 0,
            "retract on empty column {}, placements and retractions are unpaired",
            column
        );
        self.heights[column] -= 1;
        self.cells[column + WIDTH * self.heights[column]] = None;
        self.num_moves -= 1;
    }

    /// Whether every column is full
    pub fn is_full(&self) -> bool {
        // gravity means a column is full exactly when its top cell is taken
        self.cells[WIDTH * (HEIGHT - 1)..].iter().all(Option::is_some)
    }

    /// Returns the side owning a run of at least `RUN_LENGTH` tiles, if any
    pub fn winner(&self) -> Option<Side> {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let side = match self.cell(row, column) {
                    Some(side) => side,
                    None => continue,
                };
                for &(d_row, d_column) in DIRECTIONS.iter() {
                    if self.run_length(row, column, d_row, d_column, side) >= RUN_LENGTH {
                        return Some(side);
                    }
                }
            }
        }
        None
    }

    // counts consecutive tiles of `side` from (row, column), stopping at RUN_LENGTH
    fn run_length(
        &self,
        row: usize,
        column: usize,
        d_row: isize,
        d_column: isize,
        side: Side,
    ) -> usize {
        let mut length = 1;
        let mut r = row as isize + d_row;
        let mut c = column as isize + d_column;
        while length < RUN_LENGTH
            && r >= 0
            && r < HEIGHT as isize
            && c >= 0
            && c < WIDTH as isize
            && self.cell(r as usize, c as usize) == Some(side)
        {
            length += 1;
            r += d_row;
            c += d_column;
        }
        length
    }

    /// Classifies the position as ongoing, won or drawn
    pub fn state(&self) -> GameState {
        match self.winner() {
            Some(Side::PlayerOne) => GameState::PlayerOneWin,
            Some(Side::PlayerTwo) => GameState::PlayerTwoWin,
            None if self.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }

    /// Static score of the position from the point of view of `side`
    ///
    /// Every tile is worth one point per direction in which a run could still fit
    /// starting from it, whether or not those cells are free, plus `CENTER_BONUS`
    /// in the middle column. The score is `side`'s total minus the opponent's.
    pub fn evaluate(&self, side: Side) -> i32 {
        self.cells
            .iter()
            .zip(CELL_WEIGHTS.iter())
            .fold(0, |score, (cell, weight)| match cell {
                Some(owner) if *owner == side => score + weight,
                Some(_) => score - weight,
                None => score,
            })
    }

    /// Row-major snapshot of the grid
    pub fn rows(&self, bottom_first: bool) -> Vec<[Option<Side>; WIDTH]> {
        let mut rows: Vec<[Option<Side>; WIDTH]> = self
            .cells
            .chunks(WIDTH)
            .map(|chunk| {
                let mut row = [None; WIDTH];
                row.copy_from_slice(chunk);
                row
            })
            .collect();
        if !bottom_first {
            rows.reverse();
        }
        rows
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows(false) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or('.', Side::symbol).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A tile placed on a borrowed board, retracted when the guard is dropped
pub struct Placement<'a> {
    board: &'a mut Board,
    column: usize,
}

impl Placement<'_> {
    /// The column the tile was placed in
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.retract(self.column);
    }
}
