use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::line::{compact, compactable, reversed, Cell, Line};
use super::Direction;

/// The 16 cells of a board in row-major order.
pub type Fields = [Cell; 16];

/// Result of applying one move to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Whether any tile shifted or merged (and, for `make_move`, a tile was spawned).
    pub changed: bool,
    /// Sum of the tiles produced by merges during this move.
    pub score_gained: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unknown direction '{0}', choose amongst: left, right, up, down")]
    InvalidDirection(String),
    #[error("invalid board payload: {0}")]
    InvalidBoardPayload(String),
    #[error("cannot spawn {requested} tiles into {available} empty cells")]
    NotEnoughEmptyCells { requested: usize, available: usize },
}

/// A 4x4 2048 board stored as 16 optional tile values, row-major.
///
/// Rows and columns are views recomputed from the fields on every call.
/// The board only changes through [`Board::make_move`] and [`Board::spawn_random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    fields: Fields,
}

impl Board {
    /// A board with no tiles.
    pub const EMPTY: Board = Board { fields: [None; 16] };

    /// Largest tile a 4x4 game can ever produce. Anything above it could overflow a merge.
    pub const MAX_TILE: u32 = 1 << 17;

    /// A fresh game board: empty, then seeded with two random tiles.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::EMPTY;
        board.place_random(2, rng);
        board
    }

    /// Build a board from externally supplied cells. No tiles are added.
    ///
    /// Every present value must be a power of two between 2 and [`Board::MAX_TILE`].
    pub fn from_fields(fields: Fields) -> Result<Self, BoardError> {
        if let Some((idx, value)) = fields
            .iter()
            .enumerate()
            .find_map(|(idx, &cell)| cell.filter(|v| !is_tile_value(*v)).map(|v| (idx, v)))
        {
            return Err(BoardError::InvalidBoardPayload(format!(
                "cell {idx} holds {value}, which is not a tile value (a power of two from 2 to {})",
                Board::MAX_TILE
            )));
        }
        Ok(Board { fields })
    }

    /// Like [`Board::from_fields`] but for a slice of unknown length.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        let fields: Fields = cells.try_into().map_err(|_| {
            BoardError::InvalidBoardPayload(format!("expected 16 cells, got {}", cells.len()))
        })?;
        Self::from_fields(fields)
    }

    #[inline]
    pub fn fields(&self) -> &Fields { &self.fields }

    #[inline]
    pub fn into_fields(self) -> Fields { self.fields }

    /// The four rows, top to bottom, each read left to right.
    pub fn rows(&self) -> [Line; 4] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.fields[r * 4 + c]))
    }

    /// The four columns, left to right, each read top to bottom.
    pub fn columns(&self) -> [Line; 4] {
        std::array::from_fn(|c| std::array::from_fn(|r| self.fields[r * 4 + c]))
    }

    /// Slide/merge tiles in `dir` on a copy of this board. No random insert.
    ///
    /// This is what strategists use to look ahead; `self` is never touched.
    pub fn shift(&self, dir: Direction) -> (Board, MoveOutcome) {
        let lines = if dir.is_vertical() { self.columns() } else { self.rows() };
        let mut score_gained = 0;
        let compacted: [Line; 4] = lines.map(|line| {
            let (line, points) = if dir.is_reversed() {
                let (out, points) = compact(reversed(line));
                (reversed(out), points)
            } else {
                compact(line)
            };
            score_gained += points;
            line
        });

        let mut fields = [None; 16];
        for (i, line) in compacted.iter().enumerate() {
            for (j, cell) in line.iter().enumerate() {
                // columns go back into row-major storage transposed
                let idx = if dir.is_vertical() { j * 4 + i } else { i * 4 + j };
                fields[idx] = *cell;
            }
        }
        let moved = Board { fields };
        (moved, MoveOutcome { changed: moved != *self, score_gained })
    }

    /// Perform a move in place, then spawn one random tile if the board changed.
    pub fn make_move<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> MoveOutcome {
        let (moved, outcome) = self.shift(dir);
        if outcome.changed {
            *self = moved;
            // a changed board always has at least one free cell
            self.place_random(1, rng);
        }
        outcome
    }

    /// Parse a wire token and perform the move. Unknown tokens leave the board untouched.
    pub fn make_move_token<R: Rng + ?Sized>(&mut self, token: &str, rng: &mut R) -> Result<MoveOutcome, BoardError> {
        let dir: Direction = token.parse()?;
        Ok(self.make_move(dir, rng))
    }

    /// Put `n` random tiles (2 at 90%, 4 at 10%) on distinct empty cells.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<(), BoardError> {
        let available = self.count_empty();
        if n > available {
            return Err(BoardError::NotEnoughEmptyCells { requested: n, available });
        }
        self.place_random(n, rng);
        Ok(())
    }

    fn place_random<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) {
        let empty = self.empty_indices();
        let chosen: Vec<usize> = empty.choose_multiple(rng, n).copied().collect();
        for idx in chosen {
            self.fields[idx] = Some(generate_random_tile(rng));
        }
    }

    fn empty_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.is_none().then_some(idx))
            .collect()
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize { self.fields.iter().filter(|c| c.is_none()).count() }

    /// True once the board is full and no row or column can merge.
    pub fn is_terminal(&self) -> bool {
        self.count_empty() == 0
            && !self.rows().into_iter().any(compactable)
            && !self.columns().into_iter().any(compactable)
    }

    /// The highest tile value on the board, 0 when empty.
    pub fn highest_tile(&self) -> u32 { self.fields.iter().flatten().copied().max().unwrap_or(0) }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 { self.fields.iter().flatten().map(|&v| u64::from(v)).sum() }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (r, row) in self.rows().iter().enumerate() {
            if r > 0 {
                writeln!(f, "-----------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<&[Cell]> for Board {
    type Error = BoardError;
    fn try_from(cells: &[Cell]) -> Result<Self, Self::Error> { Board::from_cells(cells) }
}

impl From<Board> for Fields {
    fn from(board: Board) -> Self { board.into_fields() }
}

#[inline]
fn is_tile_value(v: u32) -> bool { (2..=Board::MAX_TILE).contains(&v) && v.is_power_of_two() }

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> u32 { if rng.gen_range(0..10) < 9 { 2 } else { 4 } }

fn format_val(cell: &Cell) -> String {
    match cell {
        None => " ".repeat(8),
        Some(v) => format!("{:^8}", v),
    }
}
