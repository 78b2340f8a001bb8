//! Core value types for the checkers position model.
//!
//! Squares are plain `u8` indices (`row * 8 + col`) on the full 8x8 grid.
//! Row 0 is the top of the board as rendered; Light men move toward row 0
//! and Dark men move toward row 7. Only squares with odd `row + col` are
//! playable.

pub use crate::game_state::position::Position;
pub use crate::game_state::undo_state::UndoState;

/// Board square index (`0..=63`).
pub type Square = u8;

pub const BOARD_DIMENSION: i8 = 8;
pub const BOARD_SQUARES: usize = 64;
pub const PLAYABLE_SQUARES: usize = 32;
pub const MAX_PIECES_PER_SIDE: usize = 12;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a forward step for this side's men.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// Row on which this side's men are crowned.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => BOARD_DIMENSION - 1,
        }
    }

    /// Single-byte side marker used inside position keys.
    #[inline]
    pub const fn key_marker(self) -> u8 {
        match self {
            Color::Light => b'L',
            Color::Dark => b'D',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const LIGHT_MAN: Piece = Piece::new(Color::Light, PieceKind::Man);
    pub const LIGHT_KING: Piece = Piece::new(Color::Light, PieceKind::King);
    pub const DARK_MAN: Piece = Piece::new(Color::Dark, PieceKind::Man);
    pub const DARK_KING: Piece = Piece::new(Color::Dark, PieceKind::King);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline]
    pub const fn crowned(self) -> Self {
        Self::new(self.color, PieceKind::King)
    }

    #[inline]
    pub const fn uncrowned(self) -> Self {
        Self::new(self.color, PieceKind::Man)
    }

    /// Layout / key character: `r`/`R` for Light, `b`/`B` for Dark.
    pub const fn code(self) -> u8 {
        match (self.color, self.kind) {
            (Color::Light, PieceKind::Man) => b'r',
            (Color::Light, PieceKind::King) => b'R',
            (Color::Dark, PieceKind::Man) => b'b',
            (Color::Dark, PieceKind::King) => b'B',
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'r' => Some(Self::LIGHT_MAN),
            b'R' => Some(Self::LIGHT_KING),
            b'b' => Some(Self::DARK_MAN),
            b'B' => Some(Self::DARK_KING),
            _ => None,
        }
    }
}

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Unplayable,
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub const EMPTY_CODE: u8 = b'-';
    pub const UNPLAYABLE_CODE: u8 = b'.';

    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn code(self) -> u8 {
        match self {
            Cell::Unplayable => Self::UNPLAYABLE_CODE,
            Cell::Empty => Self::EMPTY_CODE,
            Cell::Occupied(piece) => piece.code(),
        }
    }
}

/// A single step or a single jump. A jump spans two rows and removes the
/// piece on the midpoint square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        square_row(self.from).abs_diff(square_row(self.to)) == 2
    }

    /// Square of the piece removed by this move, if it is a jump.
    #[inline]
    pub const fn captured_square(self) -> Option<Square> {
        if self.is_capture() {
            Some(((self.from as u16 + self.to as u16) / 2) as Square)
        } else {
            None
        }
    }
}

#[inline]
pub const fn square_row(square: Square) -> i8 {
    (square / 8) as i8
}

#[inline]
pub const fn square_col(square: Square) -> i8 {
    (square % 8) as i8
}

/// Square at `(row, col)` or `None` when the coordinates fall off the board.
#[inline]
pub const fn square_at(row: i8, col: i8) -> Option<Square> {
    if row < 0 || row >= BOARD_DIMENSION || col < 0 || col >= BOARD_DIMENSION {
        None
    } else {
        Some((row * BOARD_DIMENSION + col) as Square)
    }
}

#[inline]
pub const fn is_playable(square: Square) -> bool {
    (square as usize) < BOARD_SQUARES && (square_row(square) + square_col(square)) % 2 == 1
}

/// Dense index (`0..32`) of a playable square. Each row holds four playable
/// cells, so halving the grid index is enough.
#[inline]
pub const fn playable_index(square: Square) -> usize {
    square as usize / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_midpoint_is_between_endpoints() {
        let jump = Move::new(square_at(5, 0).unwrap(), square_at(3, 2).unwrap());
        assert!(jump.is_capture());
        assert_eq!(jump.captured_square(), square_at(4, 1));

        let step = Move::new(square_at(5, 0).unwrap(), square_at(4, 1).unwrap());
        assert!(!step.is_capture());
        assert_eq!(step.captured_square(), None);
    }

    #[test]
    fn playable_squares_map_to_dense_indices() {
        let mut seen = [false; PLAYABLE_SQUARES];
        for square in 0..BOARD_SQUARES as Square {
            if is_playable(square) {
                let idx = playable_index(square);
                assert!(!seen[idx], "index {idx} reused");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn piece_codes_are_reversible() {
        for piece in [Piece::LIGHT_MAN, Piece::LIGHT_KING, Piece::DARK_MAN, Piece::DARK_KING] {
            assert_eq!(Piece::from_code(piece.code()), Some(piece));
        }
        assert_eq!(Piece::from_code(b'x'), None);
    }
}
