//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose`

use plum_checkers::engines::engine_minimax::MinimaxEngine;
use plum_checkers::engines::engine_random::RandomEngine;
use plum_checkers::engines::engine_trait::Engine;
use plum_checkers::errors::EngineResult;
use plum_checkers::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> EngineResult<()> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    let default_filter = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Swap these to compare difficulty levels or scorers.
    let player1 = || {
        MinimaxEngine::from_level(2)
            .map(|e| Box::new(e) as Box<dyn Engine>)
            .unwrap_or_else(|_| Box::new(RandomEngine::new()))
    };
    let player2 = || {
        MinimaxEngine::from_level(1)
            .map(|e| Box::new(e) as Box<dyn Engine>)
            .unwrap_or_else(|_| Box::new(RandomEngine::new()))
    };

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: 10,
            base_seed: 1234,
            per_game: MatchConfig {
                max_plies: 300,
                ..MatchConfig::default()
            },
            verbose,
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
