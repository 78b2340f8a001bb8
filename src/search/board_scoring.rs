//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Scores are always `own - opponent` for the requested perspective.

use crate::game_state::checkers_rules::{DOUBLE_CORNER_SQUARES, SINGLE_CORNER_TRAPS};
use crate::game_state::checkers_types::*;

/// Score of a position where one side has no pieces left.
pub const WIN_SCORE: i32 = 9900;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `perspective`.
    fn score(&self, position: &Position, perspective: Color) -> i32;
}

/// Plain piece count: men 100, kings 150.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Man => 100,
            PieceKind::King => 150,
        }
    }

    fn side_material(position: &Position, color: Color) -> i32 {
        position
            .pieces(color)
            .iter()
            .filter_map(|&sq| position.piece_at(sq))
            .map(|piece| Self::piece_value(piece.kind))
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        if let Some(score) = decided_score(position, perspective) {
            return score;
        }
        Self::side_material(position, perspective)
            - Self::side_material(position, perspective.opposite())
    }
}

/// Weights for `CheckersScorer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub king_base: i32,
    /// Proximity multiplier for a side that is ahead in piece count.
    pub king_chase_ahead: i32,
    pub king_chase_even: i32,
    /// Cap on king-to-king proximity, also the value when no enemy king exists.
    pub proximity_cap: i32,
    pub king_edge_pin: i32,
    pub man_base: i32,
    pub man_advance: i32,
    pub man_edge: i32,
    pub man_support: i32,
    pub double_corner_trap: i32,
    pub single_corner_trap: i32,
    pub material_lead_base: i32,
    pub material_lead_cap: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            king_base: 336,
            king_chase_ahead: 3,
            king_chase_even: 1,
            proximity_cap: 5,
            king_edge_pin: 20,
            man_base: 200,
            man_advance: 2,
            man_edge: 4,
            man_support: 4,
            double_corner_trap: 50,
            single_corner_trap: 25,
            material_lead_base: 17,
            material_lead_cap: 5000,
        }
    }
}

/// Positional evaluator tuned for endgame conversion: kings chase enemy
/// kings when ahead, lone kings are driven out of the double corner, and a
/// material lead is worth more the fewer pieces the opponent keeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckersScorer {
    pub weights: ScoringWeights,
}

impl CheckersScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn side_value(&self, position: &Position, own: Color) -> i32 {
        let w = &self.weights;
        let opp = own.opposite();
        let own_count = position.piece_count(own) as i32;
        let opp_count = position.piece_count(opp) as i32;
        let chase = if own_count > opp_count {
            w.king_chase_ahead
        } else {
            w.king_chase_even
        };

        let mut value = 0;
        for &sq in position.pieces(own) {
            let Some(piece) = position.piece_at(sq) else {
                continue;
            };
            let row = square_row(sq);
            let col = square_col(sq);
            if piece.is_king() {
                value += w.king_base - chase * king_proximity(position, sq, own, w.proximity_cap);
                if pins_enemy_king_on_edge(position, row, col, opp) {
                    value += w.king_edge_pin;
                }
            } else {
                let start_row = own.promotion_row() - own.forward() * (BOARD_DIMENSION - 1);
                let advanced = (row - start_row).abs() as i32;
                value += w.man_base + w.man_advance * advanced;
                if col == 0 || col == BOARD_DIMENSION - 1 {
                    value += w.man_edge;
                }
                if is_supported(position, row, col, own) {
                    value += w.man_support;
                }
            }
        }

        if lone_king_in_double_corner(position, opp) && own_count > 1 {
            value += w.double_corner_trap;
        }
        for (corner, guard) in SINGLE_CORNER_TRAPS {
            if position.look(corner.0, corner.1) == Cell::Occupied(Piece::new(opp, PieceKind::King))
                && position.look(guard.0, guard.1)
                    == Cell::Occupied(Piece::new(own, PieceKind::King))
            {
                value += w.single_corner_trap;
            }
        }

        if own_count > opp_count {
            let scale = w.material_lead_base - opp_count;
            value += ((own_count - opp_count) * scale * scale).min(w.material_lead_cap);
        }
        value
    }
}

impl BoardScorer for CheckersScorer {
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        if let Some(score) = decided_score(position, perspective) {
            return score;
        }
        self.side_value(position, perspective) - self.side_value(position, perspective.opposite())
    }
}

/// `±WIN_SCORE` when a side has run out of pieces.
#[inline]
fn decided_score(position: &Position, perspective: Color) -> Option<i32> {
    if position.piece_count(perspective.opposite()) == 0 {
        Some(WIN_SCORE)
    } else if position.piece_count(perspective) == 0 {
        Some(-WIN_SCORE)
    } else {
        None
    }
}

/// Chebyshev distance from `square` to the nearest king of the side opposing
/// `own`, capped at `cap`.
pub fn king_proximity(position: &Position, square: Square, own: Color, cap: i32) -> i32 {
    let row = square_row(square);
    let col = square_col(square);
    position
        .kings(own.opposite())
        .map(|k| {
            let dr = (square_row(k) - row).abs() as i32;
            let dc = (square_col(k) - col).abs() as i32;
            dr.max(dc)
        })
        .fold(cap, i32::min)
}

/// Average distance from `own`'s kings to their nearest enemy king, where
/// distances of two or less count as zero. `None` when `own` has no kings.
pub fn king_closeness(position: &Position, own: Color, cap: i32) -> Option<f64> {
    let mut total = 0i32;
    let mut kings = 0i32;
    for sq in position.kings(own) {
        let proximity = king_proximity(position, sq, own, cap);
        if proximity > 2 {
            total += proximity;
        }
        kings += 1;
    }
    (kings > 0).then(|| f64::from(total) / f64::from(kings))
}

/// A king two squares away from an enemy king sitting on the same line near
/// an edge keeps it from stepping off that edge.
fn pins_enemy_king_on_edge(position: &Position, row: i8, col: i8, opp: Color) -> bool {
    let enemy_king = Cell::Occupied(Piece::new(opp, PieceKind::King));
    (row == 2 && position.look(row - 2, col) == enemy_king)
        || (row == 5 && position.look(row + 2, col) == enemy_king)
        || (col == 2 && position.look(row, col - 2) == enemy_king)
        || (col == 5 && position.look(row, col + 2) == enemy_king)
}

fn is_supported(position: &Position, row: i8, col: i8, own: Color) -> bool {
    let friendly_man = Cell::Occupied(Piece::new(own, PieceKind::Man));
    let behind = row - own.forward();
    position.look(behind, col - 1) == friendly_man || position.look(behind, col + 1) == friendly_man
}

fn lone_king_in_double_corner(position: &Position, color: Color) -> bool {
    let [sq] = position.pieces(color) else {
        return false;
    };
    position.piece_at(*sq).is_some_and(Piece::is_king)
        && DOUBLE_CORNER_SQUARES
            .iter()
            .any(|&(r, c)| square_at(r, c) == Some(*sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        square_at(row, col).unwrap()
    }

    #[test]
    fn start_position_is_balanced() {
        let pos = Position::new_game();
        let scorer = CheckersScorer::default();
        assert_eq!(scorer.score(&pos, Color::Light), 0);
        assert_eq!(scorer.score(&pos, Color::Dark), 0);
        assert_eq!(MaterialScorer.score(&pos, Color::Light), 0);
    }

    #[test]
    fn no_pieces_is_a_decided_game() {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(5, 0), Piece::LIGHT_MAN));
        assert_eq!(CheckersScorer::default().score(&pos, Color::Light), WIN_SCORE);
        assert_eq!(CheckersScorer::default().score(&pos, Color::Dark), -WIN_SCORE);
    }

    #[test]
    fn advanced_men_score_higher() {
        let scorer = CheckersScorer::default();
        let mut back = Position::new_empty();
        assert!(back.put_piece(sq(7, 2), Piece::LIGHT_MAN));
        assert!(back.put_piece(sq(0, 5), Piece::DARK_MAN));
        let mut forward = Position::new_empty();
        assert!(forward.put_piece(sq(3, 2), Piece::LIGHT_MAN));
        assert!(forward.put_piece(sq(0, 5), Piece::DARK_MAN));
        assert!(scorer.score(&forward, Color::Light) > scorer.score(&back, Color::Light));
    }

    #[test]
    fn proximity_is_capped_and_uses_nearest_king() {
        let mut pos = Position::new_empty();
        assert!(pos.put_piece(sq(4, 3), Piece::LIGHT_KING));
        assert_eq!(king_proximity(&pos, sq(4, 3), Color::Light, 5), 5);
        assert_eq!(king_closeness(&pos, Color::Dark, 5), None);

        assert!(pos.put_piece(sq(1, 0), Piece::DARK_KING));
        assert!(pos.put_piece(sq(6, 5), Piece::DARK_KING));
        assert_eq!(king_proximity(&pos, sq(4, 3), Color::Light, 5), 2);
        assert_eq!(king_closeness(&pos, Color::Light, 5), Some(0.0));
    }

    #[test]
    fn lone_king_in_double_corner_favors_the_hunter() {
        let scorer = CheckersScorer::default();
        let mut cornered = Position::new_empty();
        assert!(cornered.put_piece(sq(0, 1), Piece::LIGHT_KING));
        assert!(cornered.put_piece(sq(1, 0), Piece::LIGHT_KING));
        assert!(cornered.put_piece(sq(7, 6), Piece::DARK_KING));

        let mut central = Position::new_empty();
        assert!(central.put_piece(sq(0, 1), Piece::LIGHT_KING));
        assert!(central.put_piece(sq(1, 0), Piece::LIGHT_KING));
        assert!(central.put_piece(sq(3, 4), Piece::DARK_KING));

        assert!(scorer.score(&cornered, Color::Light) > scorer.score(&central, Color::Light));
    }
}
