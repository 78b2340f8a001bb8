//! Diagonal direction tables and single-step geometry shared by the
//! generator and the legality checks.

use crate::game_state::checkers_types::*;

/// Diagonal directions in generation order: the two forward diagonals first,
/// then the two backward diagonals that only kings may use.
#[inline]
pub fn directions_for(piece: Piece) -> &'static [(i8, i8)] {
    const LIGHT: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];
    const DARK: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    let all: &'static [(i8, i8); 4] = match piece.color {
        Color::Light => &LIGHT,
        Color::Dark => &DARK,
    };
    if piece.is_king() {
        all
    } else {
        &all[..2]
    }
}

/// Destination of a plain step from `from` along `dir`, if the landing cell
/// is an empty playable square.
#[inline]
pub fn step_target(position: &Position, from: Square, dir: (i8, i8)) -> Option<Square> {
    let row = square_row(from) + dir.0;
    let col = square_col(from) + dir.1;
    square_at(row, col).filter(|&sq| position.cell(sq).is_empty())
}

/// Destination of a jump by `piece` from `from` along `dir`: the adjacent
/// cell must hold an enemy piece and the cell beyond it must be empty.
#[inline]
pub fn jump_target(
    position: &Position,
    piece: Piece,
    from: Square,
    dir: (i8, i8),
) -> Option<Square> {
    let row = square_row(from);
    let col = square_col(from);
    let over = position.look(row + dir.0, col + dir.1).piece()?;
    if over.color == piece.color {
        return None;
    }
    square_at(row + 2 * dir.0, col + 2 * dir.1).filter(|&sq| position.cell(sq).is_empty())
}
