//! Cheap legality predicates used by the generator, the search and the
//! game driver.

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};
use crate::move_generation::legal_move_shared::{directions_for, jump_target, step_target};

/// Whether the piece on `square` has at least one jump available.
pub fn jump_possible(position: &Position, square: Square) -> bool {
    let Some(piece) = position.piece_at(square) else {
        return false;
    };
    directions_for(piece)
        .iter()
        .any(|&dir| jump_target(position, piece, square, dir).is_some())
}

/// Whether the piece on `square` has at least one plain step available.
pub fn step_possible(position: &Position, square: Square) -> bool {
    let Some(piece) = position.piece_at(square) else {
        return false;
    };
    directions_for(piece)
        .iter()
        .any(|&dir| step_target(position, square, dir).is_some())
}

/// Whether `color` is obliged to capture this turn.
pub fn forced_capture_exists(position: &Position, color: Color) -> bool {
    position
        .pieces(color)
        .iter()
        .any(|&sq| jump_possible(position, sq))
}

pub fn any_move_exists(position: &Position, color: Color) -> bool {
    position
        .pieces(color)
        .iter()
        .any(|&sq| jump_possible(position, sq) || step_possible(position, sq))
}

/// Winner of the game if `side_to_move` cannot move. A side with no pieces
/// has no moves, so this covers both loss conditions.
pub fn terminal(position: &Position, side_to_move: Color) -> Option<Color> {
    if any_move_exists(position, side_to_move) {
        None
    } else {
        Some(side_to_move.opposite())
    }
}

/// Whether the capture `mv`, already applied to `position`, must be followed
/// by another jump from its landing square. Promotion ends the chain.
pub fn can_continue_capture(position: &Position, mv: Move) -> bool {
    mv.is_capture() && !position.just_kinged() && jump_possible(position, mv.to)
}

/// Landing square of `last_move` when its capture chain is still pending.
pub fn pending_continuation(position: &Position, last_move: Move) -> Option<Square> {
    can_continue_capture(position, last_move).then_some(last_move.to)
}

/// Full legality check for a move by `color`, honoring forced capture.
/// When `chain` is set, only a jump by the piece on that square is legal.
pub fn is_legal_move(position: &Position, color: Color, mv: Move, chain: Option<Square>) -> bool {
    if position.piece_at(mv.from).map(|p| p.color) != Some(color) {
        return false;
    }
    match chain {
        Some(square) => {
            mv.from == square && generate_capture_moves_from(position, square).contains(&mv)
        }
        None => generate_legal_moves(position, color).contains(&mv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        square_at(row, col).unwrap()
    }

    #[test]
    fn start_position_has_moves_but_no_captures() {
        let pos = Position::new_game();
        assert!(any_move_exists(&pos, Color::Light));
        assert!(!forced_capture_exists(&pos, Color::Light));
        assert_eq!(terminal(&pos, Color::Dark), None);
    }

    #[test]
    fn side_without_pieces_has_lost() {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(5, 0), Piece::LIGHT_MAN));
        assert_eq!(terminal(&pos, Color::Dark), Some(Color::Light));
    }

    #[test]
    fn blocked_man_has_no_moves() {
        // Dark man on the last row before Light's back rank, boxed in by two
        // Light men that cannot themselves be jumped.
        let pos = Position::from_layout(
            ".-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.b.-.-.-/r.r.-.-.",
        )
        .unwrap();
        assert!(!any_move_exists(&pos, Color::Dark));
        assert_eq!(terminal(&pos, Color::Dark), Some(Color::Light));
    }

    #[test]
    fn men_never_capture_backward() {
        // Light man at (4,3) with a Dark man behind it at (5,4).
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(4, 3), Piece::LIGHT_MAN));
        assert!(pos.put_piece(sq(5, 4), Piece::DARK_MAN));
        assert!(!jump_possible(&pos, sq(4, 3)));

        let mut kinged = Position::new_empty();
        assert!(kinged.put_piece(sq(4, 3), Piece::LIGHT_KING));
        assert!(kinged.put_piece(sq(5, 4), Piece::DARK_MAN));
        assert!(jump_possible(&kinged, sq(4, 3)));
    }
}
