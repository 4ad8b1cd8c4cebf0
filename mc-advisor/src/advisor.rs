//! Monte-Carlo move advisor: scores every legal move by averaged randomized
//! rollout and returns the extremal candidate.
//!
//! Candidates are enumerated in roster order, then per-piece destination
//! order; that enumeration index is the deterministic tie-break. Candidate
//! scoring is embarrassingly parallel (every task owns its clones and RNG
//! stream), so candidates are evaluated with rayon and the winner is picked
//! only after all scores are aggregated.

use crate::rollout::{average_score, saturating_score};
use mc_core::{all_legal_moves, outcome, Board, Square, Team};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rayon::prelude::*;
use thiserror::Error;

/// Mixing constant for deriving per-candidate RNG streams from the base
/// seed, keeping results independent of evaluation order.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy)]
pub struct AdvisorConfig {
    /// Rollout depth in rounds; each trial plays `depth * 2` plies.
    pub depth: u32,
    /// Randomized trials averaged per candidate.
    pub trials: u32,
    /// Base seed for all RNG streams.
    pub seed: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            trials: 10,
            seed: 0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str },
    #[error("{team} has no legal moves: the position is already terminal")]
    TerminalPosition { team: Team },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdviceStats {
    /// Legal candidate moves scored.
    pub candidates: usize,
    /// Playouts actually run (terminal candidates skip theirs).
    pub trials_run: u64,
    /// Candidates whose move immediately decided the game.
    pub terminal_candidates: usize,
}

/// A selected move with its averaged score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advice {
    pub from: Square,
    pub to: Square,
    pub expected_score: f64,
    pub stats: AdviceStats,
}

#[derive(Debug)]
pub struct Advisor {
    cfg: AdvisorConfig,
}

impl Advisor {
    pub fn new(cfg: AdvisorConfig) -> Result<Self, AdvisorError> {
        if cfg.trials == 0 {
            return Err(AdvisorError::InvalidConfig {
                msg: "trials must be > 0",
            });
        }
        Ok(Self { cfg })
    }

    /// Score every legal move for `team` and return the one with the
    /// maximum averaged score for White, minimum for Black. Ties resolve to
    /// the lowest enumeration index regardless of evaluation order.
    pub fn advise(&self, board: &Board, team: Team) -> Result<Advice, AdvisorError> {
        let candidates = all_legal_moves(board, team);
        if candidates.is_empty() {
            return Err(AdvisorError::TerminalPosition { team });
        }

        let scored: Vec<(f64, u64, bool)> = candidates
            .par_iter()
            .enumerate()
            .map(|(idx, &(from, to))| self.score_candidate(board, team, idx, from, to))
            .collect();

        // Extremal pick with first-candidate tie-break, after all scores
        // are known; strict comparison keeps the lowest index on ties.
        let mut best = 0;
        for idx in 1..scored.len() {
            let better = match team {
                Team::White => scored[idx].0 > scored[best].0,
                Team::Black => scored[idx].0 < scored[best].0,
            };
            if better {
                best = idx;
            }
        }

        let (from, to) = candidates[best];
        Ok(Advice {
            from,
            to,
            expected_score: scored[best].0,
            stats: AdviceStats {
                candidates: candidates.len(),
                trials_run: scored.iter().map(|s| s.1).sum(),
                terminal_candidates: scored.iter().filter(|s| s.2).count(),
            },
        })
    }

    /// Returns (averaged score, trials run, candidate was terminal).
    fn score_candidate(
        &self,
        board: &Board,
        team: Team,
        idx: usize,
        from: Square,
        to: Square,
    ) -> (f64, u64, bool) {
        let mut sim = board.clone();
        sim.apply_move(from, to)
            .expect("enumerated legal move applies cleanly");

        // Terminal gating for the candidate move itself: a move that ends
        // the game scores its saturating value directly, keeping the
        // rollout precondition (mover always has a legal move) intact.
        // With a zero ply budget no rollout ply runs, so the playouts
        // degrade to the immediate material score instead.
        if self.cfg.depth > 0 {
            let state = outcome(&sim);
            if state.is_decided() {
                return (f64::from(saturating_score(state, team)), 0, true);
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(candidate_seed(self.cfg.seed, idx));
        let score = average_score(
            &sim,
            team.opponent(),
            team,
            self.cfg.depth,
            self.cfg.trials,
            &mut rng,
        );
        (score, u64::from(self.cfg.trials), false)
    }
}

fn candidate_seed(seed: u64, idx: usize) -> u64 {
    seed ^ (idx as u64 + 1).wrapping_mul(SEED_MIX)
}

/// One-call convenience wrapper returning just the `(origin, destination)`
/// pair.
pub fn advise_move(
    board: &Board,
    team: Team,
    depth: u32,
    trials: u32,
    seed: u64,
) -> Result<(Square, Square), AdvisorError> {
    let advisor = Advisor::new(AdvisorConfig { depth, trials, seed })?;
    let advice = advisor.advise(board, team)?;
    Ok((advice.from, advice.to))
}
