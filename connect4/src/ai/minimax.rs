//! Fixed-depth minimax with alpha-beta pruning.
use tracing::{debug, trace};

use super::eval::{evaluate, WIN_SCORE};
use crate::board::{Board, Player, COLUMNS};
use crate::error::GameError;

pub const AI_SEARCH_DEPTH: u32 = 6;

const NEG_INF: i32 = i32::MIN / 2;
const POS_INF: i32 = i32::MAX / 2;

/// Order legal moves so alpha-beta sees center-first branches.
const MOVE_ORDER: [usize; COLUMNS] = [3, 2, 4, 1, 5, 0, 6];

fn ordered_moves(board: &Board) -> impl Iterator<Item = usize> + '_ {
    MOVE_ORDER
        .iter()
        .copied()
        .filter(move |&col| board.is_valid_move(col))
}

/// Best column for `player` searching `depth` plies. Equal scores keep the
/// earlier column in center-first order.
pub fn best_move(board: &Board, player: Player, depth: u32) -> Result<usize, GameError> {
    let mut best: Option<(usize, i32)> = None;
    for col in ordered_moves(board) {
        let child = board.execute_move(col, player)?;
        let score = minimax(
            &child,
            depth.saturating_sub(1),
            NEG_INF,
            POS_INF,
            false,
            player,
        );
        trace!(column = col, score, "root move scored");
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((col, score));
        }
    }

    let (column, score) = best.ok_or(GameError::NoMoves)?;
    debug!(column, score, depth, "minimax chose column");
    Ok(column)
}

/// Scores `board` from `ai`'s side. Wins found with more plies left score
/// further from zero, so the search takes quick wins and stalls losses.
pub fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ai: Player,
) -> i32 {
    if let Some(win) = board.check_winner() {
        return if win.winner == ai {
            WIN_SCORE + depth as i32
        } else {
            -WIN_SCORE - depth as i32
        };
    }
    if board.is_full() {
        return 0;
    }
    if depth == 0 {
        return evaluate(board, ai);
    }

    if maximizing {
        let mut best = NEG_INF;
        for col in ordered_moves(board) {
            let Ok(child) = board.execute_move(col, ai) else {
                continue;
            };
            let score = minimax(&child, depth - 1, alpha, beta, false, ai);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = POS_INF;
        for col in ordered_moves(board) {
            let Ok(child) = board.execute_move(col, ai.opponent()) else {
                continue;
            };
            let score = minimax(&child, depth - 1, alpha, beta, true, ai);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn drop_all(moves: &[(usize, Player)]) -> Board {
        moves.iter().fold(Board::new(), |board, &(col, player)| {
            board.execute_move(col, player).unwrap()
        })
    }

    #[test]
    fn ordering_is_center_first() {
        let board = Board::new();
        assert_eq!(ordered_moves(&board).collect::<Vec<_>>(), MOVE_ORDER.to_vec());

        let board = drop_all(&[(3, Player::One); 6]);
        assert_eq!(
            ordered_moves(&board).collect::<Vec<_>>(),
            vec![2, 4, 1, 5, 0, 6]
        );
    }

    #[test]
    fn terminal_scores_reward_speed() {
        let won = drop_all(&[(0, Player::Two); 4]);
        assert_eq!(minimax(&won, 3, NEG_INF, POS_INF, true, Player::Two), WIN_SCORE + 3);
        assert_eq!(minimax(&won, 3, NEG_INF, POS_INF, true, Player::One), -WIN_SCORE - 3);
        assert!(
            minimax(&won, 5, NEG_INF, POS_INF, true, Player::Two)
                > minimax(&won, 1, NEG_INF, POS_INF, true, Player::Two)
        );
    }

    #[test]
    fn depth_limit_returns_static_evaluation() {
        let board = drop_all(&[(3, Player::One), (2, Player::Two)]);
        for maximizing in [true, false] {
            assert_eq!(
                minimax(&board, 0, NEG_INF, POS_INF, maximizing, Player::One),
                evaluate(&board, Player::One)
            );
        }
    }

    #[test]
    fn takes_immediate_vertical_win() {
        let board = drop_all(&[
            (0, Player::Two),
            (0, Player::Two),
            (0, Player::Two),
            (4, Player::One),
            (5, Player::One),
        ]);
        assert_eq!(best_move(&board, Player::Two, AI_SEARCH_DEPTH), Ok(0));
    }

    #[test]
    fn blocks_vertical_threat() {
        let board = drop_all(&[
            (5, Player::One),
            (0, Player::Two),
            (5, Player::One),
            (6, Player::Two),
            (5, Player::One),
        ]);
        assert_eq!(best_move(&board, Player::Two, AI_SEARCH_DEPTH), Ok(5));
    }

    #[test]
    fn full_board_scores_as_draw_and_has_no_moves() {
        let mut board = Board::new();
        let mut player = Player::One;
        for ch in "532315310141250566206042303423260411544566".chars() {
            let col = ch.to_digit(10).unwrap() as usize;
            board = board.execute_move(col, player).unwrap();
            player = player.opponent();
        }
        assert!(board.is_full());
        assert_eq!(minimax(&board, 4, NEG_INF, POS_INF, true, Player::One), 0);
        assert_eq!(best_move(&board, Player::One, 4), Err(GameError::NoMoves));
    }

    /// Minimax without pruning, used as the reference for `minimax`.
    fn plain_minimax(board: &Board, depth: u32, maximizing: bool, ai: Player) -> i32 {
        if let Some(win) = board.check_winner() {
            return if win.winner == ai {
                WIN_SCORE + depth as i32
            } else {
                -WIN_SCORE - depth as i32
            };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, ai);
        }
        let mover = if maximizing { ai } else { ai.opponent() };
        let scores = ordered_moves(board).map(|col| {
            let child = board.execute_move(col, mover).unwrap();
            plain_minimax(&child, depth - 1, !maximizing, ai)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn plain_best_move(board: &Board, player: Player, depth: u32) -> usize {
        let mut best: Option<(usize, i32)> = None;
        for col in ordered_moves(board) {
            let child = board.execute_move(col, player).unwrap();
            let score = plain_minimax(&child, depth - 1, false, player);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((col, score));
            }
        }
        best.unwrap().0
    }

    #[test]
    fn pruning_never_changes_the_chosen_move() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut checked = 0;
        while checked < 40 {
            let mut board = Board::new();
            let mut player = Player::One;
            for _ in 0..rng.random_range(0..20) {
                let moves = board.valid_moves();
                let col = moves[rng.random_range(0..moves.len())];
                board = board.execute_move(col, player).unwrap();
                player = player.opponent();
            }
            if board.check_winner().is_some() {
                continue;
            }
            for col in ordered_moves(&board) {
                let child = board.execute_move(col, player).unwrap();
                assert_eq!(
                    minimax(&child, 3, NEG_INF, POS_INF, false, player),
                    plain_minimax(&child, 3, false, player),
                    "root child {col} of\n{board}"
                );
            }
            assert_eq!(
                best_move(&board, player, 4),
                Ok(plain_best_move(&board, player, 4)),
                "position\n{board}"
            );
            checked += 1;
        }
    }

    #[test]
    fn equal_scores_keep_the_earlier_column() {
        // Mirror-image position: columns 2 and 4 are worth the same.
        let board = drop_all(&[
            (3, Player::One),
            (3, Player::Two),
            (3, Player::One),
            (3, Player::Two),
            (3, Player::One),
            (3, Player::Two),
        ]);
        let score = |col| {
            let child = board.execute_move(col, Player::Two).unwrap();
            minimax(&child, 3, NEG_INF, POS_INF, false, Player::Two)
        };
        assert_eq!(score(2), score(4));
        for col in [1, 5, 0, 6] {
            assert!(score(col) < score(2), "column {col} ties the best");
        }
        assert_eq!(best_move(&board, Player::Two, 4), Ok(2));
    }

    #[test]
    fn immediate_win_beats_a_slower_forced_win() {
        // Column 4 wins now. Column 3 is searched first and also wins, but
        // only two plies later.
        let board = drop_all(&[
            (0, Player::Two),
            (0, Player::Two),
            (1, Player::Two),
            (2, Player::Two),
            (4, Player::One),
            (4, Player::One),
            (4, Player::One),
            (5, Player::One),
        ]);
        let score = |col, depth| {
            let child = board.execute_move(col, Player::One).unwrap();
            minimax(&child, depth - 1, NEG_INF, POS_INF, false, Player::One)
        };
        for depth in [4, AI_SEARCH_DEPTH] {
            assert!(score(3, depth) > WIN_SCORE);
            assert!(score(4, depth) > score(3, depth));
            assert_eq!(best_move(&board, Player::One, depth), Ok(4));
        }
    }
}
