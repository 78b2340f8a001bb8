//! Terminal-oriented board renderer.
//!
//! Rows are labelled `8` (grid row 0) down to `1`, columns `A`-`H`, matching
//! `square_notation`. Empty playable squares print as `·`, unplayable ones as
//! blanks.

use crate::game_state::checkers_types::*;

pub fn render_position(position: &Position) -> String {
    let mut out = String::new();
    out.push_str("  A B C D E F G H\n");

    for row in 0..BOARD_DIMENSION {
        let rank = char::from(b'0' + (BOARD_DIMENSION - row) as u8);
        out.push(rank);
        out.push(' ');
        for col in 0..BOARD_DIMENSION {
            out.push(match position.look(row, col) {
                Cell::Unplayable => ' ',
                Cell::Empty => '·',
                Cell::Occupied(piece) => char::from(piece.code()),
            });
            if col < BOARD_DIMENSION - 1 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  A B C D E F G H");
    out
}
