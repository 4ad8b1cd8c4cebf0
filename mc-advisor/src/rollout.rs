//! Randomized playouts used to score candidate moves.

use mc_core::{all_legal_moves, outcome, Board, Outcome, Team};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Saturating score for a playout that reaches a decided game: `+WIN_SCORE`
/// when the requesting team wins, `-WIN_SCORE` when it loses.
pub const WIN_SCORE: i32 = 15;

/// Score a decided outcome from `pov`'s perspective. A draw is neutral.
pub(crate) fn saturating_score(state: Outcome, pov: Team) -> i32 {
    match state.winner() {
        Some(team) if team == pov => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

/// One randomized playout: `depth * 2` uniformly random legal plies on
/// `board`, alternating teams starting with `mover`.
///
/// Terminal outcomes are evaluated after every applied move; a decided game
/// returns the saturating score for `pov`, an exhausted ply budget returns
/// the final material score.
///
/// Precondition: `board` is not already terminal for `mover`. Terminal
/// gating after every applied move keeps the precondition alive ply to ply,
/// so a violation here is a caller bug, not a game state.
pub(crate) fn run_trial(
    mut board: Board,
    mut mover: Team,
    pov: Team,
    depth: u32,
    rng: &mut ChaCha8Rng,
) -> i32 {
    for _ in 0..depth * 2 {
        let moves = all_legal_moves(&board, mover);
        assert!(
            !moves.is_empty(),
            "{mover} has no legal move; rollout started from a terminal position"
        );
        let (from, to) = moves[rng.gen_range(0..moves.len())];
        board
            .apply_move(from, to)
            .expect("enumerated legal move applies cleanly");
        mover = mover.opponent();

        let state = outcome(&board);
        if state.is_decided() {
            return saturating_score(state, pov);
        }
    }
    board.score()
}

/// Average of `trials` independent playouts from `board`.
pub(crate) fn average_score(
    board: &Board,
    mover: Team,
    pov: Team,
    depth: u32,
    trials: u32,
    rng: &mut ChaCha8Rng,
) -> f64 {
    let mut total: i64 = 0;
    for _ in 0..trials {
        total += i64::from(run_trial(board.clone(), mover, pov, depth, rng));
    }
    total as f64 / f64::from(trials)
}
