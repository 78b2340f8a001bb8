//! Plays one engine-vs-engine checkers game and prints it.
//!
//! Run with:
//! `cargo run --release -- --level 2`
//! `cargo run --release -- --level 1 --seed 7 --verbose`

use plum_checkers::engines::engine_minimax::MinimaxEngine;
use plum_checkers::engines::engine_trait::Engine;
use plum_checkers::errors::{EngineError, EngineResult};
use plum_checkers::game_state::checkers_types::{Color, Position};
use plum_checkers::utils::engine_match_harness::{play_engine_match_from_position, MatchConfig};
use plum_checkers::utils::render_position::render_position;
use tracing_subscriber::EnvFilter;

struct Args {
    level: u8,
    seed: u64,
    verbose: bool,
}

fn parse_args() -> EngineResult<Args> {
    let mut args = Args {
        level: 2,
        seed: 1,
        verbose: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--level" | "--seed" => {
                let value = iter.next().unwrap_or_default();
                let invalid = || EngineError::InvalidOptionValue {
                    name: arg.clone(),
                    value: value.clone(),
                };
                if arg == "--level" {
                    args.level = value.parse().map_err(|_| invalid())?;
                } else {
                    args.seed = value.parse().map_err(|_| invalid())?;
                }
            }
            other => return Err(EngineError::UnknownOption(other.to_owned())),
        }
    }
    Ok(args)
}

fn main() -> EngineResult<()> {
    let args = parse_args()?;

    let default_filter = if args.verbose { "plum_checkers=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let light = MinimaxEngine::from_level(args.level)?.with_seed(args.seed);
    let dark = MinimaxEngine::from_level(args.level)?.with_seed(args.seed.wrapping_add(1));
    println!("{} (level {}) vs itself, seed {}", light.name(), args.level, args.seed);

    let start = Position::new_game();
    println!("{}", render_position(&start));

    let config = MatchConfig::default();
    let first = config.first_to_move;
    let result = play_engine_match_from_position(
        Box::new(light),
        Box::new(dark),
        start,
        args.seed,
        config,
    )?;

    println!("opening: {}", result.opening_turns.join(" "));
    let mut side = if result.opening_turns.len() % 2 == 0 {
        first
    } else {
        first.opposite()
    };
    for (i, turn) in result.played_turns.iter().enumerate() {
        let label = match side {
            Color::Light => "light",
            Color::Dark => "dark",
        };
        println!("{:>4}. {label:<5} {turn}", i + 1);
        side = side.opposite();
    }

    println!("{}", render_position(&result.final_position));
    println!(
        "result: {:?} (light {} moves, dark {} moves)",
        result.outcome, result.light_move_count, result.dark_move_count
    );
    Ok(())
}
