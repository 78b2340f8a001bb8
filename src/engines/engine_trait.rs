//! Engine abstraction layer used by the game driver and the match harness.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::errors::EngineResult;
use crate::game_state::checkers_types::{Color, Move, Position, Square};

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Fixed search depth, overriding the engine's difficulty.
    pub depth: Option<u8>,
    /// Time budget, overriding the engine's difficulty.
    pub movetime_ms: Option<u64>,
    /// The game is repeating: prefer a near-best move that breaks the loop.
    pub avoid_repetition: bool,
    /// A capture chain is in progress and must continue from this square.
    pub continue_from: Option<Square>,
}

impl GoParams {
    pub fn continuing(square: Square) -> Self {
        Self {
            continue_from: Some(square),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub reached_depth: u8,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Picks one move (a step or a single jump) for `side`.
    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        params: &GoParams,
    ) -> EngineResult<EngineOutput>;
}
