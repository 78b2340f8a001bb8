//! Seeded random opening prefix for engine-vs-engine games.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::game_state::checkers_types::*;
use crate::move_generation::legal_move_apply::apply_move_in_place;
use crate::move_generation::legal_move_checks::pending_continuation;
use crate::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};

/// Turns played by the default tournament opening.
pub const DEFAULT_OPENING_TURNS: u8 = 3;

/// Position after the opening, the side to move next, and the turns played
/// (each turn is its list of single moves).
#[derive(Debug, Clone)]
pub struct RandomOpening {
    pub position: Position,
    pub side_to_move: Color,
    pub turns: Vec<Vec<Move>>,
}

/// Plays up to `turns` uniformly random legal turns, completing any capture
/// chain. Stops early if the side to move has no move.
pub fn play_random_opening<R: Rng>(
    start: &Position,
    first_to_move: Color,
    turns: u8,
    rng: &mut R,
) -> RandomOpening {
    let mut position = start.clone();
    let mut side = first_to_move;
    let mut played = Vec::with_capacity(turns as usize);

    for _ in 0..turns {
        let Some(&first) = generate_legal_moves(&position, side).choose(rng) else {
            break;
        };
        apply_move_in_place(&mut position, first);
        let mut turn = vec![first];
        let mut last = first;
        while let Some(square) = pending_continuation(&position, last) {
            let Some(&next) = generate_capture_moves_from(&position, square).choose(rng) else {
                break;
            };
            apply_move_in_place(&mut position, next);
            turn.push(next);
            last = next;
        }
        played.push(turn);
        side = side.opposite();
    }

    RandomOpening {
        position,
        side_to_move: side,
        turns: played,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_gives_same_opening() {
        let start = Position::new_game();
        let a = play_random_opening(&start, Color::Dark, 3, &mut StdRng::seed_from_u64(17));
        let b = play_random_opening(&start, Color::Dark, 3, &mut StdRng::seed_from_u64(17));
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.position, b.position);
        assert_eq!(a.turns.len(), 3);
        assert_eq!(a.side_to_move, Color::Light);
        assert!(!a.position.same_layout(&start));
    }
}
