//! Terminal-state evaluation: check, stalemate, and game outcome.

use crate::board::Board;
use crate::piece::Rank;
use crate::rules;
use crate::square::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Win state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            Outcome::WhiteWins => Some(Team::White),
            Outcome::BlackWins => Some(Team::Black),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::WhiteWins => write!(f, "white wins"),
            Outcome::BlackWins => write!(f, "black wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Whether `team`'s king is attacked.
///
/// Scans the opposing roster's **pseudo-legal** moves only. Routing this
/// through the legal tier would recurse: legality is defined by this very
/// predicate.
pub fn is_check(board: &Board, team: Team) -> bool {
    for &id in board.roster(team.opponent()) {
        let from = board
            .square_of(id)
            .expect("roster piece is on the board");
        for to in rules::pseudo_moves(board, from) {
            if let Some(target) = board.piece_at(to) {
                if target.rank == Rank::King && target.team == team {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether `team` has no legal move anywhere on its roster.
pub fn is_stalemate(board: &Board, team: Team) -> bool {
    board.roster(team).iter().all(|&id| {
        let from = board
            .square_of(id)
            .expect("roster piece is on the board");
        rules::legal_moves(board, from).is_empty()
    })
}

/// Terminal-state classification: a side with no legal moves has either
/// been mated (in check) or stalemated (draw); otherwise play continues.
pub fn outcome(board: &Board) -> Outcome {
    if is_stalemate(board, Team::White) {
        if is_check(board, Team::White) {
            Outcome::BlackWins
        } else {
            Outcome::Draw
        }
    } else if is_stalemate(board, Team::Black) {
        if is_check(board, Team::Black) {
            Outcome::WhiteWins
        } else {
            Outcome::Draw
        }
    } else {
        Outcome::Ongoing
    }
}
