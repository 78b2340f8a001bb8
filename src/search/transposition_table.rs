//! Transposition table keyed by canonical position keys.
//!
//! Each entry remembers the depth it was searched to, the score with its
//! bound type, and the node's children ordered best-first so a re-search at
//! greater depth can try the strongest replies first. Replacement is
//! depth-preferred: a shallower result never overwrites a deeper one.

use std::collections::HashMap;
use std::mem::size_of;

use crate::game_state::checkers_types::Move;
use crate::game_state::position::PositionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TTEntry {
    pub ordered_moves: Vec<Move>,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
}

impl TTEntry {
    /// Score usable at `depth` inside the `(alpha, beta)` window, if any.
    /// Only an entry searched to exactly `depth` qualifies: a deeper score
    /// carries a different distance-to-end bias.
    #[inline]
    pub fn cutoff_score(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth != depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<PositionKey, TTEntry>,
    stored_moves: usize,
    stats: TTStats,
}

impl TranspositionTable {
    /// Per-entry bookkeeping the hash map adds on top of key and value.
    const SLOT_OVERHEAD_BYTES: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Table with room for `entries` positions before the first rehash.
    pub fn with_capacity(entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(entries),
            stored_moves: 0,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stored_moves = 0;
        self.stats = TTStats::default();
    }

    /// Rough heap footprint: reserved slots plus the stored move lists.
    pub fn estimated_bytes(&self) -> usize {
        let slot = size_of::<PositionKey>() + size_of::<TTEntry>() + Self::SLOT_OVERHEAD_BYTES;
        self.entries.capacity() * slot + self.stored_moves * size_of::<Move>()
    }

    pub fn probe(&mut self, key: &PositionKey) -> Option<&TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, key: PositionKey, entry: TTEntry) {
        self.stats.stores += 1;
        match self.entries.get_mut(&key) {
            Some(existing) => {
                if entry.depth >= existing.depth {
                    self.stored_moves -= existing.ordered_moves.len();
                    self.stored_moves += entry.ordered_moves.len();
                    *existing = entry;
                }
            }
            None => {
                self.stored_moves += entry.ordered_moves.len();
                self.entries.insert(key, entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, TTEntry, TranspositionTable};
    use crate::game_state::checkers_types::{Color, Move, Position};

    fn entry(depth: u8, score: i32, bound: Bound) -> TTEntry {
        TTEntry {
            ordered_moves: vec![Move::new(41, 32), Move::new(41, 34)],
            depth,
            score,
            bound,
        }
    }

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt = TranspositionTable::with_capacity(16);
        let key = Position::new_game().key(Color::Light, None);
        tt.store(key, entry(5, 42, Bound::Exact));
        let got = tt.probe(&key).expect("entry should exist");
        assert_eq!(got.depth, 5);
        assert_eq!(got.score, 42);
        assert_eq!(got.ordered_moves.len(), 2);
        assert_eq!(tt.stats().hits, 1);
    }

    #[test]
    fn depth_preferred_replacement() {
        let mut tt = TranspositionTable::new();
        let key = Position::new_game().key(Color::Dark, None);
        tt.store(key, entry(2, 1, Bound::Upper));
        tt.store(key, entry(1, 9, Bound::Exact));
        assert_eq!(tt.probe(&key).expect("exists").score, 1);
        tt.store(key, entry(6, 3, Bound::Lower));
        let got = tt.probe(&key).expect("exists");
        assert_eq!(got.depth, 6);
        assert_eq!(got.score, 3);
    }

    #[test]
    fn cutoff_respects_depth_and_bound() {
        let exact = entry(4, 10, Bound::Exact);
        assert_eq!(exact.cutoff_score(4, -100, 100), Some(10));
        assert_eq!(exact.cutoff_score(5, -100, 100), None);
        assert_eq!(exact.cutoff_score(3, -100, 100), None);

        let lower = entry(4, 50, Bound::Lower);
        assert_eq!(lower.cutoff_score(4, 0, 40), Some(50));
        assert_eq!(lower.cutoff_score(4, 0, 60), None);
        assert_eq!(lower.cutoff_score(3, 0, 40), None);

        let upper = entry(4, -20, Bound::Upper);
        assert_eq!(upper.cutoff_score(4, -10, 40), Some(-20));
        assert_eq!(upper.cutoff_score(4, -30, 40), None);
    }
}
