//! Crate root module declarations for the Plum Checkers engine project.
//!
//! This file exposes the top-level subsystems (position model, move
//! generation, search, engines and utility helpers) so binaries, benches and
//! integration tests can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod checkers_rules;
    pub mod checkers_types;
    pub mod position;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod move_selection;
    pub mod table_reclaimer;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod random_opening;
    pub mod render_position;
    pub mod square_notation;
}
