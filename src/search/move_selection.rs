//! Choosing one root move from scored candidates.
//!
//! Normal play picks uniformly among the best-scored moves, nudging the
//! choice toward moves that close in on enemy kings when the engine is
//! hunting down a short-handed opponent. When the game is repeating, a
//! second mode deliberately accepts a slightly worse move to break the loop.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::search::board_scoring::king_closeness;
use crate::search::iterative_deepening::RootCandidate;

/// Empirical constants for move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTuning {
    /// Exclusive upper bound of the random bonus given to a tied best move
    /// that brings the engine's kings closer to enemy kings. Zero disables it.
    pub aggression_bias: i32,
    /// The bonus only applies while the opponent has at most this many pieces.
    pub aggression_max_opponent_pieces: usize,
    /// Proximity cap used when measuring king closeness.
    pub proximity_cap: i32,
    /// Repetition mode: moves within this margin of the best are flattened
    /// to `best - repetition_window`.
    pub repetition_window: i32,
    /// Repetition mode: exclusive upper bound of the random noise added to
    /// every candidate.
    pub repetition_noise: i32,
    /// Repetition mode only flattens when the best score is above this.
    pub repetition_floor: i32,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            aggression_bias: 6,
            aggression_max_opponent_pieces: 4,
            proximity_cap: 5,
            repetition_window: 100,
            repetition_noise: 5,
            repetition_floor: -120,
        }
    }
}

/// Picks uniformly among the highest-scored candidates, after the
/// aggression bonus has been applied to tied best moves.
pub fn select_best<R: Rng>(
    candidates: &[RootCandidate],
    position: &Position,
    engine_color: Color,
    tuning: &SelectionTuning,
    rng: &mut R,
) -> Option<Move> {
    let max = candidates.iter().map(|c| c.score).max()?;
    let opponent = engine_color.opposite();
    let hunting = tuning.aggression_bias > 0
        && position.piece_count(engine_color) >= position.piece_count(opponent)
        && position.piece_count(opponent) <= tuning.aggression_max_opponent_pieces;
    let closeness_now = king_closeness(position, engine_color, tuning.proximity_cap);

    let mut adjusted: Vec<(Move, i32)> = Vec::with_capacity(candidates.len());
    for candidate in candidates.iter().filter(|c| c.score == max) {
        let mut score = candidate.score;
        if hunting {
            let after = apply_move(position, candidate.mv);
            let closeness_after = king_closeness(&after, engine_color, tuning.proximity_cap);
            if let (Some(now), Some(next)) = (closeness_now, closeness_after) {
                if next < now {
                    score += rng.random_range(0..tuning.aggression_bias);
                }
            }
        }
        adjusted.push((candidate.mv, score));
    }
    choose_among_best(&adjusted, rng)
}

/// Repetition-breaking choice. Candidate scores must all be exact.
pub fn select_second_best<R: Rng>(
    candidates: &[RootCandidate],
    tuning: &SelectionTuning,
    rng: &mut R,
) -> Option<Move> {
    let max = candidates.iter().map(|c| c.score).max()?;
    let flattened = max - tuning.repetition_window;
    let adjusted: Vec<(Move, i32)> = candidates
        .iter()
        .map(|c| {
            let mut score = c.score;
            if max > tuning.repetition_floor && score >= flattened {
                score = flattened;
            }
            if tuning.repetition_noise > 0 {
                score += rng.random_range(0..tuning.repetition_noise);
            }
            (c.mv, score)
        })
        .collect();
    choose_among_best(&adjusted, rng)
}

fn choose_among_best<R: Rng>(scored: &[(Move, i32)], rng: &mut R) -> Option<Move> {
    let top = scored.iter().map(|&(_, s)| s).max()?;
    let best: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s == top)
        .map(|&(m, _)| m)
        .collect();
    best.choose(rng).copied()
}
