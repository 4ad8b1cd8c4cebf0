//! Board state: the single source of truth for piece positions.
//!
//! Pieces live in an append-only arena (`Vec<Piece>`) and the grid, team
//! rosters, and captured history all refer to them by `PieceId`. Index-based
//! storage keeps `Clone` a deep, fully independent copy, which legality
//! probing and rollouts rely on.

use crate::piece::{Piece, Rank};
use crate::square::{Square, Team, Vector, BOARD_DIM};
use std::fmt;
use thiserror::Error;

/// Index into a board's piece arena.
pub type PieceId = u32;

/// Back-rank order for the standard setup. Editing this yields variant
/// games; `Board::with_back_rank` takes a custom order.
pub const BACK_RANK: [Rank; 8] = [
    Rank::Rook,
    Rank::Knight,
    Rank::Bishop,
    Rank::Queen,
    Rank::King,
    Rank::Bishop,
    Rank::Knight,
    Rank::Rook,
];

/// Rejected board operations. Every rejection leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("no piece on {square}")]
    EmptySquareSelected { square: Square },
    #[error("piece on {square} does not belong to {expected}")]
    WrongTeamSelected { square: Square, expected: Team },
    #[error("{from} -> {to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
}

/// Result of a successful move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The moving piece as it stands after the move (pawn flag updated).
    pub piece: Piece,
    pub captured: Option<Piece>,
}

#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: [[Option<PieceId>; BOARD_DIM as usize]; BOARD_DIM as usize],
    rosters: [Vec<PieceId>; 2],
    captured: Vec<PieceId>,
}

fn in_bounds(sq: Square) -> bool {
    sq.row < BOARD_DIM && sq.col < BOARD_DIM
}

impl Board {
    /// An empty board with no pieces. Scenario and test positions are built
    /// from this with `place`.
    pub fn empty() -> Board {
        Board {
            pieces: Vec::new(),
            grid: [[None; BOARD_DIM as usize]; BOARD_DIM as usize],
            rosters: [Vec::new(), Vec::new()],
            captured: Vec::new(),
        }
    }

    /// The standard 32-piece setup.
    pub fn new() -> Board {
        Board::with_back_rank(BACK_RANK)
    }

    /// Standard setup with a custom back-rank order.
    ///
    /// Pawns enter the rosters first (columns left to right), then the back
    /// rank; roster order is what the advisor enumerates candidates in.
    pub fn with_back_rank(back_rank: [Rank; 8]) -> Board {
        let mut board = Board::empty();
        let last = BOARD_DIM - 1;
        for col in 0..BOARD_DIM {
            board.place(Square { row: 1, col }, Rank::Pawn, Team::Black);
            board.place(Square { row: last - 1, col }, Rank::Pawn, Team::White);
        }
        for (col, &rank) in back_rank.iter().enumerate() {
            let col = col as u8;
            board.place(Square { row: 0, col }, rank, Team::Black);
            board.place(Square { row: last, col }, rank, Team::White);
        }
        board
    }

    /// Put a fresh piece on an empty square, registering it in its team's
    /// roster. Panics if the square is occupied or off-board; this is a
    /// setup-time operation, not a game move.
    pub fn place(&mut self, square: Square, rank: Rank, team: Team) -> PieceId {
        assert!(in_bounds(square), "place: {square} is off the board");
        assert!(
            self.grid[square.row as usize][square.col as usize].is_none(),
            "place: {square} is already occupied"
        );
        let id = self.pieces.len() as PieceId;
        self.pieces.push(Piece::new(rank, team));
        self.grid[square.row as usize][square.col as usize] = Some(id);
        self.roster_mut(team).push(id);
        id
    }

    fn roster_mut(&mut self, team: Team) -> &mut Vec<PieceId> {
        match team {
            Team::White => &mut self.rosters[0],
            Team::Black => &mut self.rosters[1],
        }
    }

    /// Ids of the team's pieces currently on the board, in roster order.
    pub fn roster(&self, team: Team) -> &[PieceId] {
        match team {
            Team::White => &self.rosters[0],
            Team::Black => &self.rosters[1],
        }
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id as usize]
    }

    /// The piece on `square`, if any. Off-board squares read as empty.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.id_at(square).map(|id| self.piece(id))
    }

    pub fn id_at(&self, square: Square) -> Option<PieceId> {
        if in_bounds(square) {
            self.grid[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    /// Current square of a piece, by grid scan. `None` once captured.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        Square::all().find(|&sq| self.grid[sq.row as usize][sq.col as usize] == Some(id))
    }

    /// Captured pieces in order of capture.
    pub fn captured(&self) -> impl Iterator<Item = &Piece> {
        self.captured.iter().map(|&id| self.piece(id))
    }

    pub fn empty_squares(&self) -> Vec<Square> {
        Square::all().filter(|&sq| self.id_at(sq).is_none()).collect()
    }

    /// Aggregate material score: White values minus Black values, king
    /// excluded by its zero base value.
    pub fn score(&self) -> i32 {
        Square::all()
            .filter_map(|sq| self.piece_at(sq))
            .map(|p| p.signed_value())
            .sum()
    }

    /// Walk `delta` from `from` for at most `max_steps`, collecting traversed
    /// squares in order. Stops exclusively at the board edge and inclusively
    /// at the first occupied square; the caller decides whether an occupied
    /// terminus is a capture or a block.
    pub fn ray_cast(&self, from: Square, delta: Vector, max_steps: u8) -> Vec<Square> {
        let mut squares = Vec::new();
        for step in 1..=max_steps {
            let Some(sq) = from.offset(delta, step) else {
                break;
            };
            squares.push(sq);
            if self.id_at(sq).is_some() {
                break;
            }
        }
        squares
    }

    /// Move the piece on `from` to `to`, capturing any occupant of `to`.
    ///
    /// Performs structural checks only (bounds, origin occupancy); legality
    /// is the caller's responsibility, via `rules::legal_moves` or
    /// `rules::validate_move`. On rejection the board is unchanged.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        for sq in [from, to] {
            if !in_bounds(sq) {
                return Err(MoveError::OutOfBounds {
                    row: sq.row,
                    col: sq.col,
                });
            }
        }
        let mover = self
            .id_at(from)
            .ok_or(MoveError::EmptySquareSelected { square: from })?;

        let captured = self.id_at(to).map(|victim| {
            self.captured.push(victim);
            let team = self.piece(victim).team;
            self.roster_mut(team).retain(|&id| id != victim);
            *self.piece(victim)
        });

        self.grid[to.row as usize][to.col as usize] = Some(mover);
        self.grid[from.row as usize][from.col as usize] = None;
        if self.pieces[mover as usize].rank == Rank::Pawn {
            self.pieces[mover as usize].mark_moved();
        }

        Ok(MoveRecord {
            from,
            to,
            piece: *self.piece(mover),
            captured,
        })
    }

    /// Deterministic textual grid: 3-character cells joined by ` | `, ranks
    /// separated by dashed lines.
    pub fn render_text(&self) -> String {
        let dim = BOARD_DIM as usize;
        let mut out = String::new();
        for row in 0..dim {
            for col in 0..dim {
                match self.grid[row][col] {
                    Some(id) => out.push_str(&self.piece(id).to_string()),
                    None => out.push_str("   "),
                }
                if col == dim - 1 {
                    out.push('\n');
                } else {
                    out.push_str(" | ");
                }
            }
            if row != dim - 1 {
                out.push_str(&"-".repeat(6 * dim - 3));
                out.push('\n');
            }
        }
        out
    }

    /// One-line roster summary, e.g. `white: wPa, wRo`.
    pub fn roster_text(&self, team: Team) -> String {
        let names: Vec<String> = self
            .roster(team)
            .iter()
            .map(|&id| self.piece(id).to_string())
            .collect();
        format!("{}: {}", team, names.join(", "))
    }

    /// One-line captured-piece summary in order of capture.
    pub fn captured_text(&self) -> String {
        let names: Vec<String> = self.captured().map(|p| p.to_string()).collect();
        format!("captured: {}", names.join(", "))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
