//! Legal move generation with the forced-capture rule.
//!
//! Pieces are visited in piece-list order and, per piece, directions in the
//! order given by `legal_move_shared::directions_for`. If any jump exists for
//! the side, only jumps are returned.

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_checks::forced_capture_exists;
use crate::move_generation::legal_move_shared::{directions_for, jump_target, step_target};

/// All legal single moves (steps or first jumps) for `color`.
pub fn generate_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(16);
    if forced_capture_exists(position, color) {
        for &from in position.pieces(color) {
            push_captures_from(position, from, &mut moves);
        }
    } else {
        for &from in position.pieces(color) {
            push_steps_from(position, from, &mut moves);
        }
    }
    moves
}

/// Jumps available to the piece on `from`, used to continue a capture chain.
pub fn generate_capture_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let mut moves = Vec::with_capacity(4);
    push_captures_from(position, from, &mut moves);
    moves
}

fn push_captures_from(position: &Position, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = position.piece_at(from) else {
        return;
    };
    for &dir in directions_for(piece) {
        if let Some(to) = jump_target(position, piece, from, dir) {
            out.push(Move::new(from, to));
        }
    }
}

fn push_steps_from(position: &Position, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = position.piece_at(from) else {
        return;
    };
    for &dir in directions_for(piece) {
        if let Some(to) = step_target(position, from, dir) {
            out.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        square_at(row, col).unwrap()
    }

    #[test]
    fn start_position_has_seven_steps_each() {
        let pos = Position::new_game();
        let light = generate_legal_moves(&pos, Color::Light);
        let dark = generate_legal_moves(&pos, Color::Dark);
        assert_eq!(light.len(), 7);
        assert_eq!(dark.len(), 7);
        assert!(light.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn forced_capture_suppresses_steps() {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(5, 0), Piece::LIGHT_MAN));
        assert!(pos.put_piece(sq(5, 6), Piece::LIGHT_MAN));
        assert!(pos.put_piece(sq(4, 1), Piece::DARK_MAN));

        let moves = generate_legal_moves(&pos, Color::Light);
        assert_eq!(moves, vec![Move::new(sq(5, 0), sq(3, 2))]);
    }

    #[test]
    fn king_steps_in_all_four_directions() {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(4, 3), Piece::DARK_KING));
        let moves = generate_legal_moves(&pos, Color::Dark);
        assert_eq!(
            moves,
            vec![
                Move::new(sq(4, 3), sq(5, 4)),
                Move::new(sq(4, 3), sq(5, 2)),
                Move::new(sq(4, 3), sq(3, 4)),
                Move::new(sq(4, 3), sq(3, 2)),
            ]
        );
    }

    #[test]
    fn generation_is_repeatable() {
        let pos = Position::new_game();
        assert_eq!(
            generate_legal_moves(&pos, Color::Light),
            generate_legal_moves(&pos, Color::Light)
        );
    }
}
