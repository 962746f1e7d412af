//! Static evaluation of non-terminal positions.
use once_cell::sync::Lazy;

use crate::board::{Board, Player, Position, CENTER_COLUMN, COLUMNS, ROWS, WIN_LENGTH};

pub const WIN_SCORE: i32 = 10_000;
pub const SCORE_FOUR_IN_ROW: i32 = 100;
pub const SCORE_THREE_IN_ROW: i32 = 5;
pub const SCORE_TWO_IN_ROW: i32 = 2;
pub const SCORE_OPPONENT_THREE: i32 = 6;
pub const SCORE_OPPONENT_TWO: i32 = 1;
pub const SCORE_CENTER_COLUMN_BONUS: i32 = 3;

type Window = [Position; WIN_LENGTH];

/// Every four-cell line on the board: horizontal, vertical, down-right and
/// down-left windows, in that order.
static WINDOWS: Lazy<Vec<Window>> = Lazy::new(generate_windows);

fn generate_windows() -> Vec<Window> {
    let mut windows = Vec::new();
    let mut push = |cells: [(usize, usize); WIN_LENGTH]| {
        windows.push(cells.map(|(row, col)| Position::new(row, col)));
    };
    // Horizontal
    for row in 0..ROWS {
        for col in 0..=COLUMNS - WIN_LENGTH {
            push([(row, col), (row, col + 1), (row, col + 2), (row, col + 3)]);
        }
    }
    // Vertical
    for col in 0..COLUMNS {
        for row in 0..=ROWS - WIN_LENGTH {
            push([(row, col), (row + 1, col), (row + 2, col), (row + 3, col)]);
        }
    }
    // Diagonal down-right
    for row in 0..=ROWS - WIN_LENGTH {
        for col in 0..=COLUMNS - WIN_LENGTH {
            push([
                (row, col),
                (row + 1, col + 1),
                (row + 2, col + 2),
                (row + 3, col + 3),
            ]);
        }
    }
    // Diagonal down-left
    for row in 0..=ROWS - WIN_LENGTH {
        for col in WIN_LENGTH - 1..COLUMNS {
            push([
                (row, col),
                (row + 1, col - 1),
                (row + 2, col - 2),
                (row + 3, col - 3),
            ]);
        }
    }
    windows
}

/// Positive when `player` stands better. Window patterns plus a flat bonus
/// for each of `player`'s discs in the center column.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let windows: i32 = WINDOWS
        .iter()
        .map(|window| score_window(board, window, player))
        .sum();
    let center = (0..ROWS)
        .filter(|&row| board.get(row, CENTER_COLUMN) == Some(player))
        .count() as i32;
    windows + center * SCORE_CENTER_COLUMN_BONUS
}

fn score_window(board: &Board, window: &Window, player: Player) -> i32 {
    let mut own = 0;
    let mut theirs = 0;
    let mut empty = 0;
    for pos in window {
        match board.get(pos.row, pos.col) {
            Some(p) if p == player => own += 1,
            Some(_) => theirs += 1,
            None => empty += 1,
        }
    }

    let mut score = match (own, empty) {
        (4, _) => SCORE_FOUR_IN_ROW,
        (3, 1) => SCORE_THREE_IN_ROW,
        (2, 2) => SCORE_TWO_IN_ROW,
        _ => 0,
    };
    score -= match (theirs, empty) {
        (3, 1) => SCORE_OPPONENT_THREE,
        (2, 2) => SCORE_OPPONENT_TWO,
        _ => 0,
    };
    score
}
