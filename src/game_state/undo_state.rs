use crate::game_state::checkers_types::*;

/// Single undo record for `apply_move_in_place` / `reverse_move_in_place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub captured_piece: Option<Piece>,
    /// Index the captured square held in its owner's piece list.
    pub captured_list_index: u8,
    pub promoted: bool,
    pub prev_just_kinged: bool,
}
