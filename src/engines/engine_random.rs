//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! harness tests and as a sparring partner for the minimax engine.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_types::{Color, Position};
use crate::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumCheckers Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| EngineError::InvalidOptionValue {
                    name: name.to_string(),
                    value: value.to_string(),
                })?;
            self.rng = StdRng::seed_from_u64(seed);
            Ok(())
        } else {
            Err(EngineError::UnknownOption(name.to_string()))
        }
    }

    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let legal_moves = match params.continue_from {
            Some(square) => generate_capture_moves_from(position, square),
            None => generate_legal_moves(position, side),
        };

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        let picked = legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoLegalMoves)?;
        out.best_move = Some(picked);
        Ok(out)
    }
}
