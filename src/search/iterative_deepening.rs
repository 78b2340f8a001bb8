//! Iterative deepening search with minimax alpha-beta pruning.
//!
//! Scores are always from the engine's point of view: nodes where the engine
//! is to move maximize, the others minimize. A capture chain is searched as a
//! sequence of `ContinueCapture` nodes that keep the mover and the remaining
//! depth, so a multi-jump costs one ply no matter how long it is.
//!
//! Timed searches check the deadline before every node and every sibling.
//! An interrupted iteration returns `None` all the way up, is never cached,
//! and leaves the previous iteration's result in place. The first iteration
//! always runs to completion.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::game_state::checkers_types::*;
use crate::game_state::position::PositionKey;
use crate::move_generation::legal_move_apply::{apply_move_in_place, reverse_move_in_place};
use crate::move_generation::legal_move_checks::can_continue_capture;
use crate::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::MoveOrdering;
use crate::search::transposition_table::{Bound, TTEntry, TTStats, TranspositionTable};

/// Larger than any reachable score.
pub const INFINITY_SCORE: i32 = 20_000;
/// Base score for a side that has no legal move, offset by remaining depth
/// so that a later loss scores better than an earlier one.
pub const NO_MOVES_SCORE: i32 = 9950;
pub const MAX_SEARCH_DEPTH: u8 = 64;

/// What the side to move must do at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An ordinary turn: any legal move.
    Turn,
    /// Mid-chain: the piece on this square must jump again.
    ContinueCapture(Square),
}

impl NodeKind {
    #[inline]
    pub fn chain(self) -> Option<Square> {
        match self {
            NodeKind::Turn => None,
            NodeKind::ContinueCapture(square) => Some(square),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    /// Give every root move a full window so all root scores are exact.
    pub score_all_root_moves: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            movetime_ms: None,
            score_all_root_moves: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCandidate {
    pub mv: Move,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationInfo {
    pub depth: u8,
    pub best_score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Root moves of the deepest completed iteration, best first. Only the
    /// best score is guaranteed exact unless every root move was given a
    /// full window; tied best moves always carry exact scores.
    pub candidates: Vec<RootCandidate>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub timed_out: bool,
    pub iterations: Vec<IterationInfo>,
    pub tt_stats: TTStats,
}

impl SearchResult {
    pub fn best_move(&self) -> Option<Move> {
        self.candidates.first().map(|c| c.mv)
    }
}

/// Runs a search with throwaway tables.
pub fn iterative_deepening_search<S: BoardScorer>(
    position: &Position,
    engine_color: Color,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let mut tt = TranspositionTable::new();
    let mut ordering = MoveOrdering::new();
    iterative_deepening_search_with_tables(
        position,
        engine_color,
        NodeKind::Turn,
        scorer,
        config,
        &mut tt,
        &mut ordering,
    )
}

/// Runs a search from `root` reusing the caller's table and ordering
/// heuristics. Depth-only configs search once at `max_depth`; timed configs
/// deepen from 1 until the deadline or `max_depth`.
pub fn iterative_deepening_search_with_tables<S: BoardScorer>(
    position: &Position,
    engine_color: Color,
    root: NodeKind,
    scorer: &S,
    config: SearchConfig,
    tt: &mut TranspositionTable,
    ordering: &mut MoveOrdering,
) -> SearchResult {
    let started_at = Instant::now();
    let deadline = config
        .movetime_ms
        .map(|ms| started_at + Duration::from_millis(ms));
    let max_depth = config.max_depth.clamp(1, MAX_SEARCH_DEPTH);
    let first_depth = if deadline.is_some() { 1 } else { max_depth };

    let mut searcher = Searcher {
        scorer,
        engine_color,
        tt,
        ordering,
        deadline: None,
        nodes: 0,
    };
    let mut root_position = position.clone();
    let mut result = SearchResult::default();

    for depth in first_depth..=max_depth {
        if depth > first_depth {
            if deadline.is_some_and(|limit| Instant::now() >= limit) {
                break;
            }
            searcher.deadline = deadline;
        }

        let Some(candidates) =
            searcher.search_root(&mut root_position, root, depth, config.score_all_root_moves)
        else {
            result.timed_out = true;
            if depth == first_depth + 1 {
                warn!(depth, "time budget ran out before the second iteration finished");
            } else {
                debug!(depth, "iteration interrupted by deadline");
            }
            break;
        };

        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        let best_score = candidates.first().map_or(0, |c| c.score);
        debug!(
            depth,
            best_score,
            nodes = searcher.nodes,
            elapsed_ms,
            "search iteration complete"
        );
        result.iterations.push(IterationInfo {
            depth,
            best_score,
            nodes: searcher.nodes,
            elapsed_ms,
        });
        let finished = candidates.is_empty();
        result.candidates = candidates;
        result.best_score = best_score;
        result.reached_depth = depth;
        if finished {
            break;
        }
    }

    result.nodes = searcher.nodes;
    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    result.tt_stats = searcher.tt.stats();
    result
}

struct Searcher<'a, S: BoardScorer> {
    scorer: &'a S,
    engine_color: Color,
    tt: &'a mut TranspositionTable,
    ordering: &'a mut MoveOrdering,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<S: BoardScorer> Searcher<'_, S> {
    #[inline]
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|limit| Instant::now() >= limit)
    }

    /// Scores every root move. Outside of `score_all` mode the window is
    /// narrowed to `best - 1` so ties with the best move stay exact.
    fn search_root(
        &mut self,
        position: &mut Position,
        root: NodeKind,
        depth: u8,
        score_all: bool,
    ) -> Option<Vec<RootCandidate>> {
        let side = self.engine_color;
        let key = position.key(side, root.chain());
        let seeded = self.tt.probe(&key).map(|entry| entry.ordered_moves.clone());
        let moves = self.node_moves(position, side, root, 0, seeded);
        if moves.is_empty() {
            return Some(Vec::new());
        }

        let mut alpha = -INFINITY_SCORE;
        let mut best = -INFINITY_SCORE;
        let mut candidates = Vec::with_capacity(moves.len());
        for mv in moves {
            if self.out_of_time() {
                return None;
            }
            let undo = apply_move_in_place(position, mv);
            let score = self.child_score(position, side, mv, depth, 0, alpha, INFINITY_SCORE);
            reverse_move_in_place(position, &undo);
            let score = score?;

            candidates.push(RootCandidate { mv, score });
            best = best.max(score);
            if !score_all {
                alpha = alpha.max(best - 1);
            }
        }

        candidates.sort_by_key(|c| Reverse(c.score));
        self.tt.store(
            key,
            TTEntry {
                ordered_moves: candidates.iter().map(|c| c.mv).collect(),
                depth,
                score: best,
                bound: Bound::Exact,
            },
        );
        Some(candidates)
    }

    /// Value of the position reached by `mover` playing `mv` at a node with
    /// `depth` plies remaining.
    #[allow(clippy::too_many_arguments)]
    fn child_score(
        &mut self,
        position: &mut Position,
        mover: Color,
        mv: Move,
        depth: u8,
        ply: usize,
        alpha: i32,
        beta: i32,
    ) -> Option<i32> {
        if can_continue_capture(position, mv) {
            self.minimax(
                position,
                mover,
                NodeKind::ContinueCapture(mv.to),
                depth,
                ply,
                alpha,
                beta,
            )
        } else if depth > 1 {
            self.minimax(
                position,
                mover.opposite(),
                NodeKind::Turn,
                depth - 1,
                ply + 1,
                alpha,
                beta,
            )
        } else {
            self.nodes += 1;
            Some(self.scorer.score(position, self.engine_color))
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        position: &mut Position,
        side: Color,
        kind: NodeKind,
        depth: u8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Option<i32> {
        if self.out_of_time() {
            return None;
        }
        self.nodes += 1;

        let key = position.key(side, kind.chain());
        let mut seeded = None;
        if let Some(entry) = self.tt.probe(&key) {
            if let Some(score) = entry.cutoff_score(depth, alpha, beta) {
                return Some(score);
            }
            seeded = Some(entry.ordered_moves.clone());
        }

        let moves = self.node_moves(position, side, kind, ply, seeded);
        if moves.is_empty() {
            return Some(match kind {
                NodeKind::Turn => self.no_moves_score(side, depth),
                NodeKind::ContinueCapture(_) => self.scorer.score(position, self.engine_color),
            });
        }

        let maximizing = side == self.engine_color;
        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing {
            -INFINITY_SCORE
        } else {
            INFINITY_SCORE
        };
        let mut scored: Vec<(Move, i32)> = Vec::with_capacity(moves.len());
        let mut cutoff_at = None;

        for (idx, &mv) in moves.iter().enumerate() {
            if self.out_of_time() {
                return None;
            }
            let undo = apply_move_in_place(position, mv);
            let score = self.child_score(position, side, mv, depth, ply, alpha, beta);
            reverse_move_in_place(position, &undo);
            let score = score?;
            scored.push((mv, score));

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                self.ordering.record_cutoff(ply, mv, depth);
                cutoff_at = Some(idx);
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };

        if maximizing {
            scored.sort_by_key(|&(_, s)| Reverse(s));
        } else {
            scored.sort_by_key(|&(_, s)| s);
        }
        let mut ordered_moves: Vec<Move> = scored.iter().map(|&(m, _)| m).collect();
        if let Some(idx) = cutoff_at {
            ordered_moves.extend_from_slice(&moves[idx + 1..]);
        }
        self.store(key, ordered_moves, depth, best, bound);
        Some(best)
    }

    fn node_moves(
        &self,
        position: &Position,
        side: Color,
        kind: NodeKind,
        ply: usize,
        seeded: Option<Vec<Move>>,
    ) -> Vec<Move> {
        if let Some(mut moves) = seeded {
            // Stored order is by score; only the killer jumps ahead of it.
            self.ordering.promote_killer(&mut moves, ply);
            return moves;
        }
        let mut moves = match kind {
            NodeKind::Turn => generate_legal_moves(position, side),
            NodeKind::ContinueCapture(square) => generate_capture_moves_from(position, square),
        };
        self.ordering.order(&mut moves, ply);
        moves
    }

    #[inline]
    fn no_moves_score(&self, side: Color, depth: u8) -> i32 {
        let magnitude = NO_MOVES_SCORE + i32::from(depth);
        if side == self.engine_color {
            -magnitude
        } else {
            magnitude
        }
    }

    #[inline]
    fn store(
        &mut self,
        key: PositionKey,
        ordered_moves: Vec<Move>,
        depth: u8,
        score: i32,
        bound: Bound,
    ) {
        self.tt.store(
            key,
            TTEntry {
                ordered_moves,
                depth,
                score,
                bound,
            },
        );
    }
}
