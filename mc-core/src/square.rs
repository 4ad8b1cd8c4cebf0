//! Squares, teams, and direction vectors for the 8x8 board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const BOARD_DIM: u8 = 8;

/// A direction step as (row delta, col delta).
pub type Vector = (i8, i8);

/// A coordinate on the 8x8 grid.
///
/// Row 0 is Black's home rank, row 7 is White's. White advances toward
/// decreasing row indices, Black toward increasing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Build a square, rejecting out-of-range coordinates.
    pub fn new(row: u8, col: u8) -> Option<Square> {
        if row < BOARD_DIM && col < BOARD_DIM {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Build a square from possibly-negative coordinates.
    pub fn from_signed(row: i16, col: i16) -> Option<Square> {
        if (0..BOARD_DIM as i16).contains(&row) && (0..BOARD_DIM as i16).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The square `steps` applications of `v` away, or `None` once it
    /// leaves the board.
    pub fn offset(self, v: Vector, steps: u8) -> Option<Square> {
        let row = self.row as i16 + v.0 as i16 * steps as i16;
        let col = self.col as i16 + v.1 as i16 * steps as i16;
        Square::from_signed(row, col)
    }

    /// All squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_DIM).flat_map(|row| (0..BOARD_DIM).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    /// Algebraic notation: files a..h left to right, ranks 8..1 top to bottom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_DIM - self.row;
        write!(f, "{file}{rank}")
    }
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    White,
    Black,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// Row delta for this team's forward direction.
    pub fn forward(self) -> i8 {
        match self {
            Team::White => -1,
            Team::Black => 1,
        }
    }

    /// Single-letter code used in board rendering.
    pub fn letter(self) -> char {
        match self {
            Team::White => 'w',
            Team::Black => 'b',
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "white"),
            Team::Black => write!(f, "black"),
        }
    }
}
