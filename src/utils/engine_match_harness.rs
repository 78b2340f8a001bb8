//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other with an optional
//! seeded random opening, drives capture chains through continuation
//! queries, asks engines to break repetitions, and adjudicates games that
//! stop making progress.

use std::time::Instant;

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_rules::{
    DRAW_MIN_PLIES, DRAW_WINDOW_PLIES, REPETITION_MIN_PLIES, WIN_MIN_PLIES, WIN_WINDOW_PLIES,
};
use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::apply_checked_move;
use crate::move_generation::legal_move_checks::{pending_continuation, terminal};
use crate::utils::random_opening::{play_random_opening, DEFAULT_OPENING_TURNS};
use crate::utils::square_notation::turn_to_notation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The loser had no legal move (or no pieces).
    LightWin,
    DarkWin,
    /// Piece counts frozen and unequal for a long stretch.
    LightWinAdjudicated,
    DarkWinAdjudicated,
    /// Piece counts frozen and equal for a long stretch.
    DrawNoProgress,
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            MatchOutcome::LightWin | MatchOutcome::LightWinAdjudicated => Some(Color::Light),
            MatchOutcome::DarkWin | MatchOutcome::DarkWinAdjudicated => Some(Color::Dark),
            MatchOutcome::DrawNoProgress | MatchOutcome::DrawMaxPlies => None,
        }
    }

    fn win_for(color: Color, adjudicated: bool) -> Self {
        match (color, adjudicated) {
            (Color::Light, false) => MatchOutcome::LightWin,
            (Color::Dark, false) => MatchOutcome::DarkWin,
            (Color::Light, true) => MatchOutcome::LightWinAdjudicated,
            (Color::Dark, true) => MatchOutcome::DarkWinAdjudicated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin {
        player: PlayerId,
        color: Color,
        adjudicated: bool,
    },
    DrawNoProgress,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Turn cap; a game reaching it is drawn.
    pub max_plies: u16,
    pub opening_turns: u8,
    pub first_to_move: Color,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 500,
            opening_turns: DEFAULT_OPENING_TURNS,
            first_to_move: Color::Dark,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_position: Position,
    pub opening_turns: Vec<String>,
    pub played_turns: Vec<String>,
    pub light_move_count: u32,
    pub dark_move_count: u32,
    pub light_total_time_ns: u128,
    pub dark_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub started_at: Option<DateTime<Local>>,
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        let started = self
            .started_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_owned());
        format!(
            "started={} games={} player1_wins={} player2_wins={} draws={} \
             p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            started,
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Whether the game is cycling: the current position also stood 4 and 8
/// plies ago, or 8 and 16 plies ago. `history[0]` is the start and the last
/// entry is the current position, one entry per turn.
pub fn is_repeating(history: &[Position]) -> bool {
    let Some(plies) = history.len().checked_sub(1) else {
        return false;
    };
    if plies <= REPETITION_MIN_PLIES {
        return false;
    }
    let current = &history[plies];
    let same = |back: usize| history[plies - back].same_layout(current);
    (same(4) && same(8)) || (same(8) && same(16))
}

/// Verdict for a game whose piece counts have stopped changing.
pub fn adjudicate(history: &[Position]) -> Option<MatchOutcome> {
    let plies = history.len().checked_sub(1)?;
    let current = &history[plies];
    let counts = |p: &Position| (p.piece_count(Color::Light), p.piece_count(Color::Dark));
    let (light, dark) = counts(current);

    let unchanged_for = |window: usize| counts(&history[plies - window]) == (light, dark);

    if plies > DRAW_MIN_PLIES && light == dark && unchanged_for(DRAW_WINDOW_PLIES) {
        return Some(MatchOutcome::DrawNoProgress);
    }
    if plies > WIN_MIN_PLIES && light != dark && unchanged_for(WIN_WINDOW_PLIES) {
        let leader = if light > dark { Color::Light } else { Color::Dark };
        return Some(MatchOutcome::win_for(leader, true));
    }
    None
}

/// Play a single seeded engine-vs-engine match from the starting position.
pub fn play_engine_match(
    engine_light: Box<dyn Engine>,
    engine_dark: Box<dyn Engine>,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    play_engine_match_from_position(engine_light, engine_dark, Position::new_game(), seed, config)
}

/// Play a single seeded match from a caller-provided position. The random
/// opening is still applied when `config.opening_turns > 0`.
pub fn play_engine_match_from_position(
    mut engine_light: Box<dyn Engine>,
    mut engine_dark: Box<dyn Engine>,
    start: Position,
    seed: u64,
    config: MatchConfig,
) -> EngineResult<MatchResult> {
    engine_light.new_game();
    engine_dark.new_game();

    let mut rng = StdRng::seed_from_u64(seed);
    let opening = play_random_opening(&start, config.first_to_move, config.opening_turns, &mut rng);
    let mut position = opening.position;
    let mut side = opening.side_to_move;

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_position: position.clone(),
        opening_turns: opening.turns.iter().map(|t| turn_to_notation(t)).collect(),
        played_turns: Vec::new(),
        light_move_count: 0,
        dark_move_count: 0,
        light_total_time_ns: 0,
        dark_total_time_ns: 0,
    };
    let mut history = vec![position.clone()];

    for _ in 0..config.max_plies {
        if let Some(winner) = terminal(&position, side) {
            result.outcome = MatchOutcome::win_for(winner, false);
            break;
        }

        let params = GoParams {
            avoid_repetition: is_repeating(&history),
            ..config.go_params.clone()
        };
        let engine = match side {
            Color::Light => engine_light.as_mut(),
            Color::Dark => engine_dark.as_mut(),
        };
        let started = Instant::now();
        let turn = play_turn(engine, &mut position, side, &params)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match side {
            Color::Light => {
                result.light_move_count = result.light_move_count.saturating_add(1);
                result.light_total_time_ns = result.light_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Dark => {
                result.dark_move_count = result.dark_move_count.saturating_add(1);
                result.dark_total_time_ns = result.dark_total_time_ns.saturating_add(elapsed_ns);
            }
        }
        result.played_turns.push(turn_to_notation(&turn));
        history.push(position.clone());
        side = side.opposite();

        if let Some(outcome) = adjudicate(&history) {
            result.outcome = outcome;
            break;
        }
    }

    result.final_position = position;
    Ok(result)
}

/// One full turn: the engine's move plus any capture-chain continuations.
fn play_turn(
    engine: &mut dyn Engine,
    position: &mut Position,
    side: Color,
    params: &GoParams,
) -> EngineResult<Vec<Move>> {
    let out = engine.choose_move(position, side, params)?;
    let mut last = out.best_move.ok_or(EngineError::NoLegalMoves)?;
    apply_checked_move(position, side, last, None)?;
    let mut turn = vec![last];

    while let Some(square) = pending_continuation(position, last) {
        let chain_params = GoParams {
            continue_from: Some(square),
            avoid_repetition: false,
            ..params.clone()
        };
        let out = engine.choose_move(position, side, &chain_params)?;
        last = out.best_move.ok_or(EngineError::NoLegalMoves)?;
        apply_checked_move(position, side, last, Some(square))?;
        turn.push(last);
    }
    Ok(turn)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player 1 takes Dark in even-numbered games and Light in odd ones.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> EngineResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        started_at: Some(Local::now()),
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_color = if i % 2 == 0 { Color::Dark } else { Color::Light };
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            info!(game = i + 1, games = config.games, seed, ?player1_color, "starting game");
        }

        let result = match player1_color {
            Color::Light => play_engine_match(
                player1_factory(),
                player2_factory(),
                seed,
                config.per_game.clone(),
            )?,
            Color::Dark => play_engine_match(
                player2_factory(),
                player1_factory(),
                seed,
                config.per_game.clone(),
            )?,
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = match player1_color {
            Color::Light => (
                result.light_move_count,
                result.light_total_time_ns,
                result.dark_move_count,
                result.dark_total_time_ns,
            ),
            Color::Dark => (
                result.dark_move_count,
                result.dark_total_time_ns,
                result.light_move_count,
                result.light_total_time_ns,
            ),
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome.winner() {
            Some(color) => {
                let player = if color == player1_color {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin {
                    player,
                    color,
                    adjudicated: matches!(
                        result.outcome,
                        MatchOutcome::LightWinAdjudicated | MatchOutcome::DarkWinAdjudicated
                    ),
                }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::DrawNoProgress {
                    SeriesOutcome::DrawNoProgress
                } else {
                    SeriesOutcome::DrawMaxPlies
                }
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            info!(
                game = i + 1,
                result = ?mapped,
                turns = result.played_turns.len(),
                p1_wins = stats.player1_wins,
                p2_wins = stats.player2_wins,
                draws = stats.draws,
                "game finished"
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;

    fn kings_at(light: (i8, i8), dark: (i8, i8)) -> Position {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(square_at(light.0, light.1).unwrap(), Piece::LIGHT_KING));
        assert!(pos.put_piece(square_at(dark.0, dark.1).unwrap(), Piece::DARK_KING));
        pos
    }

    #[test]
    fn four_ply_cycle_is_detected_after_sixteen_plies() {
        let cycle = [
            kings_at((7, 0), (0, 7)),
            kings_at((6, 1), (0, 7)),
            kings_at((6, 1), (1, 6)),
            kings_at((7, 0), (1, 6)),
        ];
        let history: Vec<Position> = (0..18).map(|i| cycle[i % 4].clone()).collect();
        assert!(is_repeating(&history));
        assert!(!is_repeating(&history[..17]));

        let mut broken = history.clone();
        broken.push(kings_at((5, 2), (1, 6)));
        assert!(!is_repeating(&broken));
    }

    #[test]
    fn frozen_equal_counts_are_drawn_and_unequal_counts_called() {
        let even = kings_at((7, 0), (0, 7));
        let history = vec![even; DRAW_MIN_PLIES + 2];
        assert_eq!(adjudicate(&history), Some(MatchOutcome::DrawNoProgress));
        assert_eq!(adjudicate(&history[..DRAW_MIN_PLIES + 1]), None);

        let mut ahead = kings_at((7, 0), (0, 7));
        assert!(ahead.put_piece(square_at(7, 2).unwrap(), Piece::LIGHT_MAN));
        let history = vec![ahead; WIN_MIN_PLIES + 2];
        assert_eq!(adjudicate(&history), Some(MatchOutcome::LightWinAdjudicated));
        assert_eq!(adjudicate(&history[..WIN_MIN_PLIES + 1]), None);
    }

    #[test]
    fn random_match_finishes_with_legal_turns() {
        let config = MatchConfig {
            max_plies: 120,
            ..MatchConfig::default()
        };
        let result = play_engine_match(
            Box::new(RandomEngine::with_seed(1)),
            Box::new(RandomEngine::with_seed(2)),
            42,
            config,
        )
        .unwrap();
        assert_eq!(result.opening_turns.len(), 3);
        assert!(result.light_move_count + result.dark_move_count > 0);
        if let Some(winner) = result.outcome.winner() {
            if matches!(result.outcome, MatchOutcome::LightWin | MatchOutcome::DarkWin) {
                assert_eq!(terminal(&result.final_position, winner.opposite()), Some(winner));
            }
        }
    }

    #[test]
    fn forced_capture_of_the_last_piece_ends_the_game() {
        let start = Position::from_layout(
            ".-.-.-.-/-.-.-.-./.-.-.-.-/-.-.B.-./.-.r.-.-/-.-.-.-./.-.-.-.-/-.-.-.-.",
        )
        .unwrap();
        let config = MatchConfig {
            max_plies: 200,
            opening_turns: 0,
            first_to_move: Color::Dark,
            go_params: GoParams::default(),
        };
        let result = play_engine_match_from_position(
            Box::new(RandomEngine::with_seed(3)),
            Box::new(MinimaxEngine::from_level(2).unwrap().with_seed(3)),
            start,
            5,
            config,
        )
        .unwrap();
        assert_eq!(result.outcome, MatchOutcome::DarkWin);
        assert_eq!(result.played_turns, vec!["E5xC3".to_owned()]);
        assert_eq!(result.final_position.piece_count(Color::Light), 0);
    }

    #[test]
    fn series_alternates_colors_and_tallies_every_game() {
        let config = MatchSeriesConfig {
            games: 2,
            base_seed: 11,
            per_game: MatchConfig {
                max_plies: 60,
                ..MatchConfig::default()
            },
            verbose: false,
        };
        let stats = play_engine_match_series(
            || Box::new(RandomEngine::with_seed(5)),
            || Box::new(RandomEngine::with_seed(6)),
            config,
        )
        .unwrap();
        assert_eq!(stats.outcomes.len(), 2);
        assert_eq!(stats.player1_wins + stats.player2_wins + stats.draws, 2);
        assert!(stats.report().starts_with("started="));
    }
}
