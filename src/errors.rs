//! Errors used throughout the checkers engine.
//!
//! The search core never fails: a timed-out search or a position without
//! moves is an ordinary outcome, not an error. `EngineError` covers the
//! boundaries where callers hand the engine untrusted data (moves, board
//! layouts, notation, engine options) and the background table reclaimer.

use thiserror::Error;

use crate::game_state::checkers_types::Square;

/// Unified error type for the checkers engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The move is not legal for the side that tried to play it.
    #[error("illegal move from square {from} to square {to}")]
    IllegalMove { from: Square, to: Square },

    /// A square index was off the board, unplayable, or did not hold the
    /// expected piece.
    #[error("invalid square {0}")]
    InvalidSquare(u8),

    /// Square or move notation (for example `C3 D4`) could not be parsed.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// A textual board layout was malformed.
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    /// The side asked to move has no legal move (the game is already over).
    #[error("no legal moves for the side to move")]
    NoLegalMoves,

    /// `set_option` was called with a name the engine does not know.
    #[error("unknown engine option: {0}")]
    UnknownOption(String),

    /// `set_option` was called with a value that could not be interpreted.
    #[error("invalid value '{value}' for option {name}")]
    InvalidOptionValue { name: String, value: String },

    /// The background reclamation worker could not be started or reached.
    #[error("table reclaimer failure: {0}")]
    Reclaimer(String),
}

/// Result alias for fallible engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
