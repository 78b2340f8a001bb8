//! Difficulty levels and per-move search budgets.
//!
//! A difficulty maps to either a fixed depth or a wall-clock budget with a
//! depth ceiling. `GoParams` overrides take precedence over the difficulty.

use crate::engines::engine_trait::GoParams;
use crate::errors::{EngineError, EngineResult};
use crate::search::iterative_deepening::SearchConfig;

/// Depth ceiling for time-budgeted levels.
pub const TIMED_MAX_DEPTH: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    Depth(u8),
    Time { movetime_ms: u64, max_depth: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    level: u8,
    budget: SearchBudget,
}

impl Difficulty {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 5;

    pub fn from_level(level: u8) -> EngineResult<Self> {
        let budget = match level {
            1 => SearchBudget::Depth(3),
            2 => SearchBudget::Depth(5),
            3 => SearchBudget::Depth(9),
            4 => SearchBudget::Time {
                movetime_ms: 2_000,
                max_depth: TIMED_MAX_DEPTH,
            },
            5 => SearchBudget::Time {
                movetime_ms: 30_000,
                max_depth: TIMED_MAX_DEPTH,
            },
            _ => {
                return Err(EngineError::InvalidOptionValue {
                    name: "Difficulty".to_string(),
                    value: level.to_string(),
                })
            }
        };
        Ok(Self { level, budget })
    }

    #[inline]
    pub fn level(self) -> u8 {
        self.level
    }

    #[inline]
    pub fn budget(self) -> SearchBudget {
        self.budget
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            level: 3,
            budget: SearchBudget::Depth(9),
        }
    }
}

/// Search configuration for one decision. An explicit `movetime_ms` wins
/// over an explicit `depth`, which wins over the difficulty.
pub fn resolve_search_config(difficulty: Difficulty, params: &GoParams) -> SearchConfig {
    let score_all_root_moves = params.avoid_repetition;
    if let Some(ms) = params.movetime_ms {
        return SearchConfig {
            max_depth: params.depth.unwrap_or(TIMED_MAX_DEPTH),
            movetime_ms: Some(ms),
            score_all_root_moves,
        };
    }
    if let Some(depth) = params.depth {
        return SearchConfig {
            max_depth: depth,
            movetime_ms: None,
            score_all_root_moves,
        };
    }
    match difficulty.budget() {
        SearchBudget::Depth(depth) => SearchConfig {
            max_depth: depth,
            movetime_ms: None,
            score_all_root_moves,
        },
        SearchBudget::Time {
            movetime_ms,
            max_depth,
        } => SearchConfig {
            max_depth,
            movetime_ms: Some(movetime_ms),
            score_all_root_moves,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_documented_budgets() {
        let expect = [
            (1, SearchBudget::Depth(3)),
            (2, SearchBudget::Depth(5)),
            (3, SearchBudget::Depth(9)),
            (
                4,
                SearchBudget::Time {
                    movetime_ms: 2_000,
                    max_depth: 20,
                },
            ),
            (
                5,
                SearchBudget::Time {
                    movetime_ms: 30_000,
                    max_depth: 20,
                },
            ),
        ];
        for (level, budget) in expect {
            assert_eq!(Difficulty::from_level(level).unwrap().budget(), budget);
        }
        assert!(Difficulty::from_level(0).is_err());
        assert!(Difficulty::from_level(6).is_err());
    }

    #[test]
    fn go_params_override_difficulty() {
        let difficulty = Difficulty::from_level(5).unwrap();
        let config = resolve_search_config(
            difficulty,
            &GoParams {
                depth: Some(4),
                ..GoParams::default()
            },
        );
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.movetime_ms, None);

        let timed = resolve_search_config(
            Difficulty::from_level(1).unwrap(),
            &GoParams {
                movetime_ms: Some(150),
                avoid_repetition: true,
                ..GoParams::default()
            },
        );
        assert_eq!(timed.movetime_ms, Some(150));
        assert_eq!(timed.max_depth, TIMED_MAX_DEPTH);
        assert!(timed.score_all_root_moves);
    }
}
