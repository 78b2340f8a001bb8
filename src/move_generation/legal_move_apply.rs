//! Make/unmake for checkers moves.
//!
//! `apply_move_in_place` assumes the move came from the generator; callers
//! holding untrusted input go through `apply_checked_move`.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_checks::is_legal_move;

/// Applies `mv` to `position` and returns what is needed to take it back.
pub fn apply_move_in_place(position: &mut Position, mv: Move) -> UndoState {
    let prev_just_kinged = position.just_kinged;
    let moving = position.grid[mv.from as usize];
    position.grid[mv.from as usize] = Cell::Empty;

    let mut captured_piece = None;
    let mut captured_list_index = 0u8;
    if let Some(mid) = mv.captured_square() {
        if let Cell::Occupied(victim) = position.grid[mid as usize] {
            position.grid[mid as usize] = Cell::Empty;
            let idx = position.piece_lists[victim.color.index()]
                .swap_remove(mid)
                .unwrap_or_default();
            captured_piece = Some(victim);
            captured_list_index = idx as u8;
        }
    }

    let mut promoted = false;
    let landed = match moving {
        Cell::Occupied(piece) => {
            position.piece_lists[piece.color.index()].relocate(mv.from, mv.to);
            if !piece.is_king() && square_row(mv.to) == piece.color.promotion_row() {
                promoted = true;
                Cell::Occupied(piece.crowned())
            } else {
                moving
            }
        }
        other => other,
    };
    position.grid[mv.to as usize] = landed;
    position.just_kinged = promoted;

    UndoState {
        mv,
        captured_piece,
        captured_list_index,
        promoted,
        prev_just_kinged,
    }
}

/// Exact inverse of `apply_move_in_place`, including piece-list order.
pub fn reverse_move_in_place(position: &mut Position, undo: &UndoState) {
    let mv = undo.mv;
    let mut moving = position.grid[mv.to as usize];
    if undo.promoted {
        if let Cell::Occupied(piece) = moving {
            moving = Cell::Occupied(piece.uncrowned());
        }
    }
    position.grid[mv.to as usize] = Cell::Empty;
    position.grid[mv.from as usize] = moving;
    if let Cell::Occupied(piece) = moving {
        position.piece_lists[piece.color.index()].relocate(mv.to, mv.from);
    }

    if let (Some(victim), Some(mid)) = (undo.captured_piece, mv.captured_square()) {
        position.grid[mid as usize] = Cell::Occupied(victim);
        position.piece_lists[victim.color.index()]
            .restore(undo.captured_list_index as usize, mid);
    }
    position.just_kinged = undo.prev_just_kinged;
}

/// Copying variant of `apply_move_in_place`.
pub fn apply_move(position: &Position, mv: Move) -> Position {
    let mut next = position.clone();
    apply_move_in_place(&mut next, mv);
    next
}

/// Validates `mv` for `color` (forced capture included) and applies it.
/// `chain` restricts the move to a jump by the piece on that square.
pub fn apply_checked_move(
    position: &mut Position,
    color: Color,
    mv: Move,
    chain: Option<Square>,
) -> EngineResult<UndoState> {
    if !is_playable(mv.from) {
        return Err(EngineError::InvalidSquare(mv.from));
    }
    if !is_playable(mv.to) {
        return Err(EngineError::InvalidSquare(mv.to));
    }
    if !is_legal_move(position, color, mv, chain) {
        return Err(EngineError::IllegalMove {
            from: mv.from,
            to: mv.to,
        });
    }
    Ok(apply_move_in_place(position, mv))
}
