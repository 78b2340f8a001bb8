//! Square and move notation: column letter `A`-`H` plus row number `1`-`8`,
//! where row `8` is the top of the board (grid row 0).

use crate::errors::{EngineError, EngineResult};
use crate::game_state::checkers_types::*;

pub fn square_to_notation(square: Square) -> String {
    let file = (b'A' + square_col(square) as u8) as char;
    let rank = (b'0' + (BOARD_DIMENSION - square_row(square)) as u8) as char;
    format!("{file}{rank}")
}

/// Parses `C3`-style notation (case-insensitive) into a playable square.
pub fn notation_to_square(text: &str) -> EngineResult<Square> {
    let bytes = text.trim().as_bytes();
    let &[file, rank] = bytes else {
        return Err(EngineError::InvalidNotation(text.to_string()));
    };
    if !file.is_ascii_alphabetic() || !rank.is_ascii_digit() {
        return Err(EngineError::InvalidNotation(text.to_string()));
    }
    let col = (file.to_ascii_uppercase() - b'A') as i8;
    let rank = (rank - b'0') as i8;
    let square = square_at(BOARD_DIMENSION - rank, col)
        .filter(|_| (1..=BOARD_DIMENSION).contains(&rank))
        .ok_or_else(|| EngineError::InvalidNotation(text.to_string()))?;
    if !is_playable(square) {
        return Err(EngineError::InvalidSquare(square));
    }
    Ok(square)
}

/// `C3-D4` for steps, `C3xE5` for jumps.
pub fn move_to_notation(mv: Move) -> String {
    let sep = if mv.is_capture() { 'x' } else { '-' };
    format!(
        "{}{sep}{}",
        square_to_notation(mv.from),
        square_to_notation(mv.to)
    )
}

/// A whole turn: `C3-D4`, or every landing square of a chain, `C3xE5xG7`.
pub fn turn_to_notation(moves: &[Move]) -> String {
    let Some(first) = moves.first() else {
        return String::new();
    };
    let mut out = move_to_notation(*first);
    for mv in &moves[1..] {
        out.push('x');
        out.push_str(&square_to_notation(mv.to));
    }
    out
}

/// Parses a move such as `C3 D4`, `c3-d4`, `C3xE5` or `C3D4`. Separators
/// and other non-alphanumeric characters are ignored.
pub fn parse_move_notation(text: &str) -> EngineResult<Move> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let cleaned = match cleaned.len() {
        // A capture marker between the squares: `C3xE5`.
        5 if cleaned.as_bytes()[2].eq_ignore_ascii_case(&b'x') => {
            format!("{}{}", &cleaned[..2], &cleaned[3..])
        }
        _ => cleaned,
    };
    if cleaned.len() != 4 {
        return Err(EngineError::InvalidNotation(text.to_string()));
    }
    let from = notation_to_square(&cleaned[..2])?;
    let to = notation_to_square(&cleaned[2..])?;
    Ok(Move::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_expected_squares() {
        assert_eq!(square_to_notation(square_at(7, 0).unwrap()), "A1");
        assert_eq!(square_to_notation(square_at(0, 7).unwrap()), "H8");
        assert_eq!(notation_to_square("a1"), Ok(square_at(7, 0).unwrap()));
        assert_eq!(notation_to_square("H8"), Ok(square_at(0, 7).unwrap()));
    }

    #[test]
    fn rejects_unplayable_and_malformed_squares() {
        assert!(matches!(
            notation_to_square("A2"),
            Err(EngineError::InvalidSquare(_))
        ));
        assert!(notation_to_square("J1").is_err());
        assert!(notation_to_square("A9").is_err());
        assert!(notation_to_square("A0").is_err());
        assert!(notation_to_square("A").is_err());
        assert!(matches!(
            notation_to_square("\u{00B0}"),
            Err(EngineError::InvalidNotation(_))
        ));
        assert!(notation_to_square("\u{0130}").is_err());
        assert!(notation_to_square("3C").is_err());
    }

    #[test]
    fn parses_common_move_spellings() {
        let expected = Move::new(
            notation_to_square("C3").unwrap(),
            notation_to_square("D4").unwrap(),
        );
        for text in ["C3 D4", "c3-d4", "C3D4", " c3 , d4 "] {
            assert_eq!(parse_move_notation(text), Ok(expected), "{text}");
        }
        let jump = parse_move_notation("C3xE5").unwrap();
        assert!(jump.is_capture());
        assert_eq!(move_to_notation(jump), "C3xE5");
        assert!(parse_move_notation("C3").is_err());
    }

    #[test]
    fn chains_list_every_landing_square() {
        let first = parse_move_notation("C3xE5").unwrap();
        let second = parse_move_notation("E5xG7").unwrap();
        assert_eq!(turn_to_notation(&[first, second]), "C3xE5xG7");
        assert_eq!(turn_to_notation(&[]), "");
    }
}
