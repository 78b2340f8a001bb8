//! Minimax alpha-beta engine with difficulty levels.
//!
//! Owns the long-lived search state for one player: the managed
//! transposition table, killer/history tables, selection tuning and the
//! random source used to break ties. A decision is one move: a step, or one
//! jump of a capture chain. After the caller applies a jump it asks
//! `pending_continuation` whether the same piece must jump again and, if so,
//! calls `choose_move` with `GoParams::continuing`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_search_config, Difficulty};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_checks::pending_continuation;
use crate::search::board_scoring::{BoardScorer, CheckersScorer};
use crate::search::iterative_deepening::{iterative_deepening_search_with_tables, NodeKind};
use crate::search::move_ordering::MoveOrdering;
use crate::search::move_selection::{select_best, select_second_best, SelectionTuning};
use crate::search::table_reclaimer::{ManagedTable, TableLimits};
use crate::utils::square_notation::{move_to_notation, square_to_notation};

pub struct MinimaxEngine<S: BoardScorer = CheckersScorer> {
    difficulty: Difficulty,
    scorer: S,
    table: ManagedTable,
    ordering: MoveOrdering,
    tuning: SelectionTuning,
    rng: StdRng,
    /// Color the table's scores are relative to.
    table_color: Option<Color>,
    last_move: Option<Move>,
}

impl MinimaxEngine<CheckersScorer> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_scorer(difficulty, CheckersScorer::default())
    }

    pub fn from_level(level: u8) -> EngineResult<Self> {
        Ok(Self::new(Difficulty::from_level(level)?))
    }
}

impl Default for MinimaxEngine<CheckersScorer> {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(difficulty: Difficulty, scorer: S) -> Self {
        Self {
            difficulty,
            scorer,
            table: ManagedTable::new(TableLimits::default()),
            ordering: MoveOrdering::new(),
            tuning: SelectionTuning::default(),
            rng: StdRng::from_rng(&mut rand::rng()),
            table_color: None,
            last_move: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_tuning(mut self, tuning: SelectionTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tuning(&self) -> &SelectionTuning {
        &self.tuning
    }

    pub fn table(&self) -> &ManagedTable {
        &self.table
    }

    /// Move chosen by the most recent `choose_move`.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Origin square of the most recent decision.
    pub fn chosen_from(&self) -> Option<Square> {
        self.last_move.map(|mv| mv.from)
    }

    /// Destination square of the most recent decision.
    pub fn chosen_to(&self) -> Option<Square> {
        self.last_move.map(|mv| mv.to)
    }

    /// Square from which the engine must keep capturing, given `position`
    /// with the last chosen move already applied. `None` once the chain is
    /// over or was ended by promotion.
    pub fn pending_continuation(&self, position: &Position) -> Option<Square> {
        self.last_move
            .and_then(|mv| pending_continuation(position, mv))
    }

    fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> EngineResult<T> {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| EngineError::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            })
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "PlumCheckers Minimax"
    }

    fn new_game(&mut self) {
        self.table.reset();
        self.ordering.clear();
        self.table_color = None;
        self.last_move = None;
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        if name.eq_ignore_ascii_case("Difficulty") {
            self.difficulty = Difficulty::from_level(Self::parse_option(name, value)?)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("TableCeilingMb") {
            let megabytes: usize = Self::parse_option(name, value)?;
            let limits = self.table.limits().with_ceiling_mb(megabytes);
            self.table.set_limits(limits);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            self.rng = StdRng::seed_from_u64(Self::parse_option(name, value)?);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("AggressionBias") {
            let bias: i32 = Self::parse_option(name, value)?;
            self.tuning.aggression_bias = bias.max(0);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("RepetitionWindow") {
            let window: i32 = Self::parse_option(name, value)?;
            self.tuning.repetition_window = window.max(0);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("RepetitionNoise") {
            let noise: i32 = Self::parse_option(name, value)?;
            self.tuning.repetition_noise = noise.max(0);
            return Ok(());
        }
        Err(EngineError::UnknownOption(name.to_string()))
    }

    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let root = match params.continue_from {
            Some(square) => match position.piece_at(square) {
                Some(piece) if piece.color == side => NodeKind::ContinueCapture(square),
                _ => return Err(EngineError::InvalidSquare(square)),
            },
            None => NodeKind::Turn,
        };

        if self.table_color != Some(side) {
            self.table.reset();
            self.table_color = Some(side);
        }
        self.table.prepare(position);
        self.ordering.clear();

        let config = resolve_search_config(self.difficulty, params);
        let result = iterative_deepening_search_with_tables(
            position,
            side,
            root,
            &self.scorer,
            config,
            self.table.live_mut(),
            &mut self.ordering,
        );

        let chosen = if params.avoid_repetition {
            select_second_best(&result.candidates, &self.tuning, &mut self.rng)
        } else {
            select_best(
                &result.candidates,
                position,
                side,
                &self.tuning,
                &mut self.rng,
            )
        };
        let Some(chosen) = chosen else {
            self.last_move = None;
            return Err(EngineError::NoLegalMoves);
        };
        self.last_move = Some(chosen);

        let mut out = EngineOutput {
            best_move: Some(chosen),
            score: Some(result.best_score),
            reached_depth: result.reached_depth,
            info_lines: Vec::with_capacity(result.iterations.len() + 3),
        };
        for iteration in &result.iterations {
            out.info_lines.push(format!(
                "info depth {} score {} nodes {} time {}",
                iteration.depth, iteration.best_score, iteration.nodes, iteration.elapsed_ms
            ));
        }
        out.info_lines.push(format!(
            "info string minimax_engine difficulty {} nodes {} nps {} timed_out {}",
            self.difficulty.level(),
            result.nodes,
            result.nps,
            result.timed_out
        ));
        out.info_lines.push(format!(
            "info string minimax_engine tt entries {} probes {} hits {} stores {}",
            self.table.live().len(),
            result.tt_stats.probes,
            result.tt_stats.hits,
            result.tt_stats.stores
        ));
        if let NodeKind::ContinueCapture(square) = root {
            out.info_lines.push(format!(
                "info string minimax_engine continuing_from {}",
                square_to_notation(square)
            ));
        }
        debug!(
            chosen = %move_to_notation(chosen),
            score = result.best_score,
            depth = result.reached_depth,
            "move chosen"
        );
        Ok(out)
    }
}
