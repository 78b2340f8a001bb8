use std::collections::HashMap;

use plum_checkers::engines::engine_minimax::MinimaxEngine;
use plum_checkers::engines::engine_trait::{Engine, GoParams};
use plum_checkers::game_state::checkers_types::*;
use plum_checkers::move_generation::legal_move_apply::apply_move;
use plum_checkers::move_generation::legal_move_checks::can_continue_capture;
use plum_checkers::move_generation::legal_move_generator::{
    generate_capture_moves_from, generate_legal_moves,
};
use plum_checkers::search::board_scoring::{
    BoardScorer, CheckersScorer, MaterialScorer, WIN_SCORE,
};
use plum_checkers::search::iterative_deepening::{
    iterative_deepening_search, SearchConfig, NO_MOVES_SCORE,
};

const KING_ENDING: &str =
    ".-.-.-.-/-.-.R.-./.-.-.-.-/-.-.-.-./.-.B.-.-/-.-.-.-./.-.-.R.-/-.-.-.-.";

const MIDGAME: &str =
    ".b.b.-.b/b.-.b.b./.-.b.-.b/-.b.-.-./.r.-.r.-/r.-.r.-./.r.-.r.r/r.r.-.r.";

fn sq(row: i8, col: i8) -> Square {
    square_at(row, col).unwrap()
}

fn full_window(depth: u8) -> SearchConfig {
    SearchConfig {
        max_depth: depth,
        movetime_ms: None,
        score_all_root_moves: true,
    }
}

/// Plain minimax without pruning, tables or ordering.
fn reference_value<S: BoardScorer>(
    position: &Position,
    side: Color,
    chain: Option<Square>,
    depth: u8,
    engine: Color,
    scorer: &S,
) -> i32 {
    let moves = match chain {
        Some(square) => generate_capture_moves_from(position, square),
        None => generate_legal_moves(position, side),
    };
    if moves.is_empty() {
        if chain.is_some() {
            return scorer.score(position, engine);
        }
        let magnitude = NO_MOVES_SCORE + i32::from(depth);
        return if side == engine { -magnitude } else { magnitude };
    }

    let values = moves
        .iter()
        .map(|&mv| reference_child(position, side, mv, depth, engine, scorer));
    if side == engine {
        values.max().unwrap()
    } else {
        values.min().unwrap()
    }
}

fn reference_child<S: BoardScorer>(
    position: &Position,
    mover: Color,
    mv: Move,
    depth: u8,
    engine: Color,
    scorer: &S,
) -> i32 {
    let child = apply_move(position, mv);
    if can_continue_capture(&child, mv) {
        reference_value(&child, mover, Some(mv.to), depth, engine, scorer)
    } else if depth > 1 {
        reference_value(&child, mover.opposite(), None, depth - 1, engine, scorer)
    } else {
        scorer.score(&child, engine)
    }
}

fn assert_matches_reference<S: BoardScorer>(
    position: &Position,
    side: Color,
    depth: u8,
    scorer: &S,
) {
    let result = iterative_deepening_search(position, side, scorer, full_window(depth));
    let searched: HashMap<Move, i32> = result
        .candidates
        .iter()
        .map(|c| (c.mv, c.score))
        .collect();

    let legal = generate_legal_moves(position, side);
    assert_eq!(searched.len(), legal.len());
    for mv in legal {
        let expected = reference_child(position, side, mv, depth, side, scorer);
        assert_eq!(searched.get(&mv), Some(&expected), "move {mv:?} depth {depth}");
    }
}

#[test]
fn pruned_search_matches_plain_minimax_from_the_start() {
    let pos = Position::new_game();
    for depth in 1..=4 {
        assert_matches_reference(&pos, Color::Dark, depth, &MaterialScorer);
    }
}

#[test]
fn pruned_search_matches_plain_minimax_in_the_midgame() {
    let pos = Position::from_layout(MIDGAME).unwrap();
    for depth in 1..=3 {
        assert_matches_reference(&pos, Color::Light, depth, &MaterialScorer);
        assert_matches_reference(&pos, Color::Light, depth, &CheckersScorer::default());
    }
}

#[test]
fn pruned_search_matches_plain_minimax_in_a_king_ending() {
    // Kings can revisit a position at a different remaining depth.
    let pos = Position::from_layout(KING_ENDING).unwrap();
    for depth in 3..=7 {
        assert_matches_reference(&pos, Color::Light, depth, &CheckersScorer::default());
    }
}

#[test]
fn narrowed_root_window_keeps_the_best_score() {
    let pos = Position::from_layout(MIDGAME).unwrap();
    let scorer = CheckersScorer::default();
    let wide = iterative_deepening_search(&pos, Color::Dark, &scorer, full_window(4));
    let narrow = iterative_deepening_search(
        &pos,
        Color::Dark,
        &scorer,
        SearchConfig {
            score_all_root_moves: false,
            ..full_window(4)
        },
    );
    assert_eq!(wide.best_score, narrow.best_score);
    let best = narrow.best_move().unwrap();
    let wide_score = wide.candidates.iter().find(|c| c.mv == best).unwrap().score;
    assert_eq!(wide_score, wide.best_score);
}

#[test]
fn forced_win_scores_never_drop_with_depth() {
    let mut pos = Position::new_empty();
    assert!(pos.put_piece(sq(5, 2), Piece::LIGHT_MAN));
    assert!(pos.put_piece(sq(4, 3), Piece::DARK_MAN));

    let mut previous = i32::MIN;
    for depth in 1..=6 {
        let result = iterative_deepening_search(
            &pos,
            Color::Light,
            &MaterialScorer,
            SearchConfig {
                max_depth: depth,
                movetime_ms: None,
                score_all_root_moves: false,
            },
        );
        assert_eq!(result.best_move(), Some(Move::new(sq(5, 2), sq(3, 4))));
        assert!(result.best_score >= previous, "depth {depth}");
        assert!(result.best_score >= WIN_SCORE);
        previous = result.best_score;
    }
    assert_eq!(previous, NO_MOVES_SCORE + 5);
}

#[test]
fn first_move_from_the_start_is_a_quiet_step() {
    let pos = Position::new_game();
    let mut engine = MinimaxEngine::from_level(1).unwrap().with_seed(9);
    let out = engine
        .choose_move(&pos, Color::Dark, &GoParams::default())
        .unwrap();
    let mv = out.best_move.unwrap();
    assert!(!mv.is_capture());

    let next = apply_move(&pos, mv);
    assert_eq!(next.piece_count(Color::Light), 12);
    assert_eq!(next.piece_count(Color::Dark), 12);
}

#[test]
fn one_second_budget_still_returns_a_legal_move() {
    let pos = Position::from_layout(MIDGAME).unwrap();
    let mut engine = MinimaxEngine::from_level(5).unwrap().with_seed(2);
    let params = GoParams {
        movetime_ms: Some(1_000),
        ..GoParams::default()
    };
    let out = engine.choose_move(&pos, Color::Light, &params).unwrap();
    let mv = out.best_move.unwrap();
    assert!(generate_legal_moves(&pos, Color::Light).contains(&mv));
    assert!(out.reached_depth >= 1);
}

#[test]
fn cornered_lone_king_scores_higher_for_the_hunter() {
    let scorer = CheckersScorer::default();
    let cornered = Position::from_layout(
        ".R.-.-.-/R.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.B.",
    )
    .unwrap();
    let central = Position::from_layout(
        ".R.-.-.-/R.-.-.-./.-.-.-.-/-.-.B.-./.-.-.-.-/-.-.-.-./.-.-.-.-/-.-.-.-.",
    )
    .unwrap();
    assert!(scorer.score(&cornered, Color::Light) > scorer.score(&central, Color::Light));
}
