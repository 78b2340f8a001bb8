//! Perft: exhaustive move-path counting for generator validation.
//!
//! A whole turn is one ply here. A capture chain is expanded jump by jump and
//! each distinct complete chain counts as one path.

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::{apply_move_in_place, reverse_move_in_place};
use crate::move_generation::legal_move_checks::can_continue_capture;
use crate::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    /// Turns that contained at least one jump.
    pub captures: u64,
    /// Turns that crowned a man.
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(position: &Position, side_to_move: Color, depth: u8) -> PerftCounts {
    let mut scratch = position.clone();
    perft_recurse(&mut scratch, side_to_move, depth)
}

fn perft_recurse(position: &mut Position, side: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(position, side) {
        let undo = apply_move_in_place(position, mv);
        total.merge(finish_turn(position, side, mv, depth));
        reverse_move_in_place(position, &undo);
    }
    total
}

fn finish_turn(position: &mut Position, side: Color, last: Move, depth: u8) -> PerftCounts {
    if can_continue_capture(position, last) {
        let mut total = PerftCounts::default();
        for mv in generate_capture_moves_from(position, last.to) {
            let undo = apply_move_in_place(position, mv);
            total.merge(finish_turn(position, side, mv, depth));
            reverse_move_in_place(position, &undo);
        }
        return total;
    }

    let mut counts = perft_recurse(position, side.opposite(), depth - 1);
    if depth == 1 {
        if last.is_capture() {
            counts.captures += 1;
        }
        if position.just_kinged() {
            counts.promotions += 1;
        }
    }
    counts
}
