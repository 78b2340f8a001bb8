//! Canonical checkers-rule constants.
//!
//! Board layouts are written as eight `/`-separated rows from row 0 (top)
//! to row 7. `.` marks an unplayable square, `-` an empty playable square,
//! `r`/`R` a Light man/king and `b`/`B` a Dark man/king.

/// Standard starting layout: Dark on rows 0-2, Light on rows 5-7.
pub const STARTING_LAYOUT: &str =
    ".b.b.b.b/b.b.b.b./.b.b.b.b/-.-.-.-./.-.-.-.-/r.r.r.r./.r.r.r.r/r.r.r.r.";

/// Men each side starts with.
pub const STARTING_PIECES: usize = 12;

/// Squares counted as the double-corner region when hunting a lone king.
pub const DOUBLE_CORNER_SQUARES: [(i8, i8); 8] = [
    (6, 7),
    (7, 6),
    (0, 1),
    (1, 0),
    (6, 5),
    (5, 6),
    (1, 2),
    (2, 1),
];

/// Single-corner traps: a king sitting on the corner square is boxed in by an
/// enemy king on the matching guard square.
pub const SINGLE_CORNER_TRAPS: [((i8, i8), (i8, i8)); 2] = [((0, 7), (2, 5)), ((7, 0), (5, 2))];

/// Repetition is only checked once the game is longer than this many plies.
pub const REPETITION_MIN_PLIES: usize = 16;

/// Draw adjudication: equal, unchanged piece counts across this window...
pub const DRAW_WINDOW_PLIES: usize = 100;
/// ...checked once the game is longer than this.
pub const DRAW_MIN_PLIES: usize = 200;

/// Win adjudication: unequal, unchanged piece counts across this window...
pub const WIN_WINDOW_PLIES: usize = 200;
/// ...checked once the game is longer than this.
pub const WIN_MIN_PLIES: usize = 400;
