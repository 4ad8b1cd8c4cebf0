//! Piece ranks, values, and data-driven movement templates.
//!
//! Each rank is described by a table of movement patterns consumed by the
//! board's ray-cast primitive, instead of per-rank dispatch. A pattern is a
//! direction vector, a travel limit, and a step mode that says whether the
//! destination may, must, or must not hold an enemy piece.

use crate::square::{Team, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl Rank {
    /// Unsigned material value. The king scores 0 so it never dominates
    /// material sums.
    pub fn base_value(self) -> i32 {
        match self {
            Rank::Pawn => 1,
            Rank::Knight | Rank::Bishop => 3,
            Rank::Rook => 5,
            Rank::Queen => 9,
            Rank::King => 0,
        }
    }

    /// Two-letter code used in board rendering.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Pawn => "Pa",
            Rank::Rook => "Ro",
            Rank::Knight => "Kn",
            Rank::Bishop => "Bi",
            Rank::Queen => "Qu",
            Rank::King => "Ki",
        }
    }
}

/// Occupancy requirement for a pattern's destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Destination must be empty or hold an enemy piece.
    MoveOrCapture,
    /// Destination must be empty (pawn forward steps).
    MoveOnly,
    /// Destination must hold an enemy piece (pawn diagonal steps).
    CaptureOnly,
}

/// One entry of a rank's movement template.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub delta: Vector,
    pub max_steps: u8,
    pub mode: StepMode,
}

const ORTHOGONALS: [Vector; 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONALS: [Vector; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const OMNI: [Vector; 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];
const KNIGHT_JUMPS: [Vector; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

/// A piece on (or captured off) the board.
///
/// `moved` is a one-way flag that only pawns consult: it permanently drops
/// the double-step once the pawn has moved at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub rank: Rank,
    pub team: Team,
    moved: bool,
}

impl Piece {
    pub fn new(rank: Rank, team: Team) -> Piece {
        Piece {
            rank,
            team,
            moved: false,
        }
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// One-way transition fired by the board on every move of this piece.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Material value signed by team: positive for White, negative for Black.
    pub fn signed_value(&self) -> i32 {
        match self.team {
            Team::White => self.rank.base_value(),
            Team::Black => -self.rank.base_value(),
        }
    }

    /// Movement template for this piece in its current state.
    ///
    /// Pattern order is fixed; together with ray-cast step order it defines
    /// the reproducible destination enumeration order.
    pub fn patterns(&self) -> Vec<Pattern> {
        match self.rank {
            Rank::Pawn => {
                let fwd = self.team.forward();
                let reach = if self.moved { 1 } else { 2 };
                vec![
                    Pattern {
                        delta: (fwd, 0),
                        max_steps: reach,
                        mode: StepMode::MoveOnly,
                    },
                    Pattern {
                        delta: (fwd, 1),
                        max_steps: 1,
                        mode: StepMode::CaptureOnly,
                    },
                    Pattern {
                        delta: (fwd, -1),
                        max_steps: 1,
                        mode: StepMode::CaptureOnly,
                    },
                ]
            }
            Rank::Knight => jumps(&KNIGHT_JUMPS, 1),
            Rank::Bishop => jumps(&DIAGONALS, 7),
            Rank::Rook => jumps(&ORTHOGONALS, 7),
            Rank::Queen => jumps(&OMNI, 7),
            Rank::King => jumps(&OMNI, 1),
        }
    }
}

fn jumps(vectors: &[Vector], max_steps: u8) -> Vec<Pattern> {
    vectors
        .iter()
        .map(|&delta| Pattern {
            delta,
            max_steps,
            mode: StepMode::MoveOrCapture,
        })
        .collect()
}

impl fmt::Display for Piece {
    /// Three-character code, e.g. `wPa` or `bKi`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.team.letter(), self.rank.code())
    }
}
