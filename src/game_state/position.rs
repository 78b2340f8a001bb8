//! Board position model.
//!
//! `Position` stores the 8x8 grid of cells together with one piece list per
//! side. The piece lists are maintained incrementally by
//! `move_generation::legal_move_apply` so the generator and the scorer can
//! walk a side's pieces without scanning the grid. List order is part of the
//! observable state: undoing a move restores it exactly, which keeps move
//! generation order stable across make/unmake.

use std::fmt;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_rules::STARTING_PIECES;
use crate::game_state::checkers_types::*;

/// Fixed-capacity list of the squares one side occupies.
#[derive(Debug, Clone, Copy)]
pub struct PieceList {
    squares: [Square; MAX_PIECES_PER_SIDE],
    len: u8,
}

impl PieceList {
    pub const fn new() -> Self {
        Self {
            squares: [0; MAX_PIECES_PER_SIDE],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len()]
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        self.as_slice().contains(&square)
    }

    /// Appends a square. Returns `false` when the list is already full.
    pub(crate) fn push(&mut self, square: Square) -> bool {
        if self.len() == MAX_PIECES_PER_SIDE {
            return false;
        }
        self.squares[self.len()] = square;
        self.len += 1;
        true
    }

    /// Rewrites `from` to `to` in place, keeping the entry's index.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<usize> {
        let idx = self.as_slice().iter().position(|&sq| sq == from)?;
        self.squares[idx] = to;
        Some(idx)
    }

    /// Removes `square` by moving the last entry into its slot.
    /// Returns the index the square occupied.
    pub(crate) fn swap_remove(&mut self, square: Square) -> Option<usize> {
        let idx = self.as_slice().iter().position(|&sq| sq == square)?;
        let last = self.len() - 1;
        self.squares[idx] = self.squares[last];
        self.len -= 1;
        Some(idx)
    }

    /// Exact inverse of `swap_remove`.
    pub(crate) fn restore(&mut self, index: usize, square: Square) {
        let end = self.len();
        if end == MAX_PIECES_PER_SIDE || index > end {
            return;
        }
        self.squares[end] = self.squares[index];
        self.squares[index] = square;
        self.len += 1;
    }
}

impl Default for PieceList {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PieceList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PieceList {}

/// Number of bytes in a `PositionKey`.
pub const POSITION_KEY_LEN: usize = PLAYABLE_SQUARES + 2;
/// Chain-marker byte for an ordinary turn (no capture continuation pending).
pub const NO_CHAIN_MARKER: u8 = 0xFF;

/// Canonical identity of a search node: the 32 playable cells, the side to
/// move, and the square a capture chain must continue from (if any).
///
/// The encoding is a full serialization of the position, so distinct nodes
/// can never share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([u8; POSITION_KEY_LEN]);

impl PositionKey {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; POSITION_KEY_LEN] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) grid: [Cell; BOARD_SQUARES],
    pub(crate) piece_lists: [PieceList; 2],
    /// Set when the last applied move crowned a man. A capture chain ends
    /// on promotion.
    pub(crate) just_kinged: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Position {
    /// Board with every playable square empty.
    pub fn new_empty() -> Self {
        let mut grid = [Cell::Unplayable; BOARD_SQUARES];
        for square in 0..BOARD_SQUARES as Square {
            if is_playable(square) {
                grid[square as usize] = Cell::Empty;
            }
        }
        Self {
            grid,
            piece_lists: [PieceList::new(); 2],
            just_kinged: false,
        }
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut position = Self::new_empty();
        let rows_per_side = (STARTING_PIECES / 4) as i8;
        for row in 0..BOARD_DIMENSION {
            let piece = if row < rows_per_side {
                Piece::DARK_MAN
            } else if row >= BOARD_DIMENSION - rows_per_side {
                Piece::LIGHT_MAN
            } else {
                continue;
            };
            for col in 0..BOARD_DIMENSION {
                if let Some(square) = square_at(row, col).filter(|&sq| is_playable(sq)) {
                    position.put_piece(square, piece);
                }
            }
        }
        position
    }

    /// Parses a layout string (see `checkers_rules`). Rows may be separated
    /// by `/` or newlines.
    pub fn from_layout(layout: &str) -> EngineResult<Self> {
        let rows: Vec<&str> = layout
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        if rows.len() != BOARD_DIMENSION as usize {
            return Err(EngineError::InvalidLayout(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut position = Self::new_empty();
        for (row, text) in rows.iter().enumerate() {
            let bytes = text.as_bytes();
            if bytes.len() != BOARD_DIMENSION as usize {
                return Err(EngineError::InvalidLayout(format!(
                    "row {row} has {} cells, expected 8",
                    bytes.len()
                )));
            }
            for (col, &code) in bytes.iter().enumerate() {
                let square = (row * 8 + col) as Square;
                let playable = is_playable(square);
                match (code, playable) {
                    (Cell::UNPLAYABLE_CODE, false) | (Cell::EMPTY_CODE, true) => {}
                    (_, true) => {
                        let piece = Piece::from_code(code).ok_or_else(|| {
                            EngineError::InvalidLayout(format!(
                                "unknown cell '{}' at row {row} col {col}",
                                code as char
                            ))
                        })?;
                        if !position.put_piece(square, piece) {
                            return Err(EngineError::InvalidLayout(format!(
                                "more than {MAX_PIECES_PER_SIDE} pieces for {:?}",
                                piece.color
                            )));
                        }
                    }
                    (_, false) => {
                        return Err(EngineError::InvalidLayout(format!(
                            "unplayable square at row {row} col {col} must be '.'"
                        )));
                    }
                }
            }
        }
        Ok(position)
    }

    /// Inverse of `from_layout`, `/`-separated.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(BOARD_SQUARES + 7);
        for row in 0..BOARD_DIMENSION as usize {
            if row > 0 {
                out.push('/');
            }
            for col in 0..BOARD_DIMENSION as usize {
                out.push(self.grid[row * 8 + col].code() as char);
            }
        }
        out
    }

    /// Places a piece on an empty playable square, updating the owner's
    /// piece list. Returns `false` if the square is not free or the list is
    /// full.
    pub fn put_piece(&mut self, square: Square, piece: Piece) -> bool {
        if !is_playable(square) || !self.grid[square as usize].is_empty() {
            return false;
        }
        if !self.piece_lists[piece.color.index()].push(square) {
            return false;
        }
        self.grid[square as usize] = Cell::Occupied(piece);
        true
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.grid
            .get(square as usize)
            .copied()
            .unwrap_or(Cell::Unplayable)
    }

    /// Cell at `(row, col)`; off-board coordinates read as unplayable.
    #[inline]
    pub fn look(&self, row: i8, col: i8) -> Cell {
        match square_at(row, col) {
            Some(square) => self.grid[square as usize],
            None => Cell::Unplayable,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell(square).piece()
    }

    /// Squares held by `color`, in piece-list order.
    #[inline]
    pub fn pieces(&self, color: Color) -> &[Square] {
        self.piece_lists[color.index()].as_slice()
    }

    #[inline]
    pub fn piece_count(&self, color: Color) -> usize {
        self.piece_lists[color.index()].len()
    }

    #[inline]
    pub fn total_pieces(&self) -> usize {
        self.piece_count(Color::Light) + self.piece_count(Color::Dark)
    }

    pub fn kings(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces(color)
            .iter()
            .copied()
            .filter(move |&sq| self.piece_at(sq).is_some_and(Piece::is_king))
    }

    #[inline]
    pub fn just_kinged(&self) -> bool {
        self.just_kinged
    }

    /// Key for the node where `side` is to move, optionally in the middle of
    /// a capture chain that must continue from `chain`.
    pub fn key(&self, side: Color, chain: Option<Square>) -> PositionKey {
        let mut bytes = [0u8; POSITION_KEY_LEN];
        let mut idx = 0;
        for (square, cell) in self.grid.iter().enumerate() {
            if is_playable(square as Square) {
                bytes[idx] = cell.code();
                idx += 1;
            }
        }
        bytes[PLAYABLE_SQUARES] = side.key_marker();
        bytes[PLAYABLE_SQUARES + 1] = chain.unwrap_or(NO_CHAIN_MARKER);
        PositionKey(bytes)
    }

    /// Same pieces on the same squares. Ignores piece-list order and the
    /// promotion flag.
    pub fn same_layout(&self, other: &Position) -> bool {
        self.grid == other.grid
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::checkers_rules::STARTING_LAYOUT;

    #[test]
    fn new_game_matches_starting_layout() {
        let built = Position::new_game();
        let parsed = Position::from_layout(STARTING_LAYOUT).unwrap();
        assert!(built.same_layout(&parsed));
        assert_eq!(built.to_layout(), STARTING_LAYOUT);
        assert_eq!(built.piece_count(Color::Light), 12);
        assert_eq!(built.piece_count(Color::Dark), 12);
    }

    #[test]
    fn layout_rejects_pieces_on_unplayable_squares() {
        let bad = "b.b.b.b./b.b.b.b./.b.b.b.b/-.-.-.-./.-.-.-.-/r.r.r.r./.r.r.r.r/r.r.r.r.";
        assert!(matches!(
            Position::from_layout(bad),
            Err(EngineError::InvalidLayout(_))
        ));
        assert!(Position::from_layout("not a board").is_err());
    }

    #[test]
    fn keys_distinguish_side_and_chain_marker() {
        let pos = Position::new_game();
        let light = pos.key(Color::Light, None);
        let dark = pos.key(Color::Dark, None);
        let chained = pos.key(Color::Light, Some(41));
        assert_ne!(light, dark);
        assert_ne!(light, chained);
        assert_eq!(light, Position::new_game().key(Color::Light, None));
    }

    #[test]
    fn piece_list_swap_remove_and_restore_are_inverse() {
        let mut list = PieceList::new();
        for sq in [1, 3, 5, 7] {
            assert!(list.push(sq));
        }
        let before = list;
        let idx = list.swap_remove(3).unwrap();
        assert_eq!(list.as_slice(), &[1, 7, 5]);
        list.restore(idx, 3);
        assert_eq!(list.as_slice(), before.as_slice());
    }
}
