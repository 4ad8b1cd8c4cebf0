//! Move generation in two tiers: pseudo-legal (movement rules only) and
//! legal (self-check filtered).
//!
//! Check detection consumes only the pseudo-legal tier; everything external
//! consumes the legal tier. Keeping the tiers separate is what breaks the
//! legality/check cycle.

use crate::board::{Board, MoveError};
use crate::outcome::is_check;
use crate::piece::StepMode;
use crate::square::{Square, Team, BOARD_DIM};

/// Destinations reachable by the piece on `from` under its movement rules
/// alone, in pattern order then ray order. Self-check is not considered.
/// An empty or off-board `from` yields no moves.
pub fn pseudo_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let mut moves = Vec::new();
    for pattern in piece.patterns() {
        for sq in board.ray_cast(from, pattern.delta, pattern.max_steps) {
            let permitted = match (pattern.mode, board.piece_at(sq)) {
                (StepMode::MoveOnly, occupant) => occupant.is_none(),
                (StepMode::CaptureOnly, Some(target)) => target.team != piece.team,
                (StepMode::CaptureOnly, None) => false,
                (StepMode::MoveOrCapture, Some(target)) => target.team != piece.team,
                (StepMode::MoveOrCapture, None) => true,
            };
            if permitted {
                moves.push(sq);
            }
        }
    }
    moves
}

/// Destinations for the piece on `from` that do not leave its own king in
/// check. Each candidate is probed on a cloned board; this is the engine's
/// dominant cost center.
///
/// Self-check is the sole criterion here. Turn order and piece ownership
/// are the caller's concern (`validate_move`).
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let team = piece.team;
    pseudo_moves(board, from)
        .into_iter()
        .filter(|&to| {
            let mut probe = board.clone();
            probe
                .apply_move(from, to)
                .expect("pseudo-legal move applies cleanly on a clone");
            !is_check(&probe, team)
        })
        .collect()
}

/// Every legal `(origin, destination)` for `team`, in roster order then
/// per-piece destination order. This is the advisor's candidate enumeration
/// and its tie-break order.
pub fn all_legal_moves(board: &Board, team: Team) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();
    for &id in board.roster(team) {
        let from = board
            .square_of(id)
            .expect("roster piece is on the board");
        for to in legal_moves(board, from) {
            moves.push((from, to));
        }
    }
    moves
}

/// Caller-side validation for an interactive or driver layer: checks, in
/// order, bounds, origin occupancy, piece ownership, and legality. A `Ok`
/// result means `Board::apply_move(from, to)` is safe and legal.
pub fn validate_move(
    board: &Board,
    team: Team,
    from: Square,
    to: Square,
) -> Result<(), MoveError> {
    for sq in [from, to] {
        if sq.row >= BOARD_DIM || sq.col >= BOARD_DIM {
            return Err(MoveError::OutOfBounds {
                row: sq.row,
                col: sq.col,
            });
        }
    }
    let piece = board
        .piece_at(from)
        .ok_or(MoveError::EmptySquareSelected { square: from })?;
    if piece.team != team {
        return Err(MoveError::WrongTeamSelected {
            square: from,
            expected: team,
        });
    }
    if !legal_moves(board, from).contains(&to) {
        return Err(MoveError::IllegalMove { from, to });
    }
    Ok(())
}
