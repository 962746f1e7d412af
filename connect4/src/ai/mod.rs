//! Computer opponent. Three tiers, each a pure function of the board, the
//! side to move and (for the lower tiers) a random source.
mod eval;
mod minimax;

use rand::Rng;
use tracing::debug;

pub use eval::{
    evaluate, SCORE_CENTER_COLUMN_BONUS, SCORE_FOUR_IN_ROW, SCORE_OPPONENT_THREE,
    SCORE_OPPONENT_TWO, SCORE_THREE_IN_ROW, SCORE_TWO_IN_ROW, WIN_SCORE,
};
pub use minimax::{best_move, minimax, AI_SEARCH_DEPTH};

use crate::board::{Board, Player, CENTER_COLUMN};
use crate::error::GameError;
use crate::state::Difficulty;

/// Picks a column for `player` using the thread-local random generator.
pub fn get_ai_move(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
) -> Result<usize, GameError> {
    get_ai_move_with_rng(board, player, difficulty, &mut rand::rng())
}

pub fn get_ai_move_with_rng<R: Rng>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, GameError> {
    let valid = board.valid_moves();
    if valid.is_empty() {
        return Err(GameError::NoMoves);
    }

    let column = match difficulty {
        Difficulty::Easy => random_move(&valid, rng),
        Difficulty::Medium => greedy_move(board, player, &valid, rng),
        Difficulty::Hard => best_move(board, player, AI_SEARCH_DEPTH)?,
    };
    debug!(?difficulty, %player, column, "ai selected move");
    Ok(column)
}

fn random_move<R: Rng>(valid: &[usize], rng: &mut R) -> usize {
    valid[rng.random_range(0..valid.len())]
}

fn wins_with(board: &Board, column: usize, player: Player) -> bool {
    board
        .execute_move(column, player)
        .ok()
        .and_then(|next| next.check_winner())
        .is_some_and(|win| win.winner == player)
}

/// Win now, else block the first column where the opponent would win, else
/// prefer the center three columns, else anything.
fn greedy_move<R: Rng>(
    board: &Board,
    player: Player,
    valid: &[usize],
    rng: &mut R,
) -> usize {
    if let Some(&col) = valid.iter().find(|&&col| wins_with(board, col, player)) {
        return col;
    }
    let opponent = player.opponent();
    if let Some(&col) = valid.iter().find(|&&col| wins_with(board, col, opponent)) {
        return col;
    }

    let center: Vec<usize> = valid
        .iter()
        .copied()
        .filter(|col| (CENTER_COLUMN - 1..=CENTER_COLUMN + 1).contains(col))
        .collect();
    if center.contains(&CENTER_COLUMN) {
        return CENTER_COLUMN;
    }
    if !center.is_empty() {
        return random_move(&center, rng);
    }
    random_move(valid, rng)
}
