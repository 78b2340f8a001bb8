//! Killer and history move-ordering heuristics.
//!
//! Both tables survive across iterative-deepening iterations of one decision
//! and are cleared before the next decision.

use crate::game_state::checkers_types::*;

/// Deepest ply the killer table tracks.
pub const MAX_PLY: usize = 128;

type HistoryTable = [[u32; BOARD_SQUARES]; BOARD_SQUARES];

#[derive(Debug, Clone)]
pub struct MoveOrdering {
    killers: [Option<Move>; MAX_PLY],
    history: Box<HistoryTable>,
}

impl Default for MoveOrdering {
    fn default() -> Self {
        Self {
            killers: [None; MAX_PLY],
            history: Box::new([[0; BOARD_SQUARES]; BOARD_SQUARES]),
        }
    }
}

impl MoveOrdering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.killers.fill(None);
        self.history.iter_mut().for_each(|row| row.fill(0));
    }

    #[inline]
    pub fn killer_at(&self, ply: usize) -> Option<Move> {
        self.killers.get(ply).copied().flatten()
    }

    #[inline]
    pub fn history_score(&self, mv: Move) -> u32 {
        self.history[mv.from as usize][mv.to as usize]
    }

    /// Records a beta/alpha cutoff caused by `mv` at `ply`. History only
    /// learns from interior nodes; a leaf cutoff says little about the move.
    pub fn record_cutoff(&mut self, ply: usize, mv: Move, remaining_depth: u8) {
        if let Some(slot) = self.killers.get_mut(ply) {
            *slot = Some(mv);
        }
        if remaining_depth > 1 {
            let entry = &mut self.history[mv.from as usize][mv.to as usize];
            *entry = entry.saturating_add(1);
        }
    }

    /// Moves the killer for `ply` to the front, keeping the relative order
    /// of the other moves. Returns whether a killer was found.
    pub fn promote_killer(&self, moves: &mut [Move], ply: usize) -> bool {
        let Some(killer) = self.killer_at(ply) else {
            return false;
        };
        match moves.iter().position(|&m| m == killer) {
            Some(pos) => {
                moves[..=pos].rotate_right(1);
                true
            }
            None => false,
        }
    }

    /// Puts the killer for `ply` first, then sorts the rest by descending
    /// history weight. The sort is stable, so generation order breaks ties.
    pub fn order(&self, moves: &mut [Move], ply: usize) {
        let rest = usize::from(self.promote_killer(moves, ply));
        moves[rest..].sort_by_key(|&m| std::cmp::Reverse(self.history_score(m)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn killer_leads_then_history_descending() {
        let a = Move::new(40, 33);
        let b = Move::new(42, 33);
        let c = Move::new(42, 35);
        let d = Move::new(44, 35);

        let mut ordering = MoveOrdering::new();
        ordering.record_cutoff(3, c, 4);
        ordering.record_cutoff(1, d, 4);
        ordering.record_cutoff(1, d, 4);
        ordering.record_cutoff(1, b, 4);

        let mut moves = [a, b, c, d];
        ordering.order(&mut moves, 3);
        assert_eq!(moves, [c, d, b, a]);
    }

    #[test]
    fn promoted_killer_keeps_the_rest_in_place() {
        let a = Move::new(40, 33);
        let b = Move::new(42, 33);
        let c = Move::new(42, 35);
        let d = Move::new(44, 35);

        let mut ordering = MoveOrdering::new();
        ordering.record_cutoff(2, c, 4);
        ordering.record_cutoff(5, d, 4);
        ordering.record_cutoff(5, d, 4);

        let mut moves = [a, b, c, d];
        assert!(ordering.promote_killer(&mut moves, 2));
        assert_eq!(moves, [c, a, b, d]);

        let mut without = [a, b];
        assert!(!ordering.promote_killer(&mut without, 2));
        assert_eq!(without, [a, b]);
    }

    #[test]
    fn leaf_cutoffs_only_set_killers() {
        let mv = Move::new(17, 26);
        let mut ordering = MoveOrdering::new();
        ordering.record_cutoff(0, mv, 1);
        assert_eq!(ordering.killer_at(0), Some(mv));
        assert_eq!(ordering.history_score(mv), 0);

        ordering.clear();
        assert_eq!(ordering.killer_at(0), None);
    }
}
