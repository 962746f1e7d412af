//! Connect 4 rules engine and computer opponent.
//! Every operation is a pure transform over `Copy` boards and owned game
//! states: nothing is cached between calls, so a caller can hold as many
//! positions as it likes and hand any of them to the AI. The AI plays at
//! three strengths: random, greedy one-ply, and depth-6 alpha-beta minimax.
pub mod ai;
pub mod board;
pub mod error;
pub mod session;
pub mod state;
pub mod stats;

pub use ai::{get_ai_move, get_ai_move_with_rng};
pub use board::{Board, Player, Position, Win, CENTER_COLUMN, COLUMNS, ROWS, WIN_LENGTH};
pub use error::GameError;
pub use session::Session;
pub use state::{
    evaluate_game_state, parse_history, Difficulty, Evaluation, GameMode, GameState, GameStatus,
    Move,
};
pub use stats::{load_or_default, MemoryStore, PlayerStats, StatsStore};

pub fn create_empty_board() -> Board {
    Board::new()
}

pub fn create_initial_state(mode: GameMode, difficulty: Difficulty) -> GameState {
    GameState::new(mode, difficulty)
}

pub fn is_valid_move(board: &Board, column: usize) -> bool {
    board.is_valid_move(column)
}

pub fn get_valid_moves(board: &Board) -> Vec<usize> {
    board.valid_moves()
}

pub fn make_move(state: &GameState, column: usize) -> Result<GameState, GameError> {
    state.make_move(column)
}

/// Lookahead helper for the AI and for callers exploring positions; the
/// board passed in is left untouched.
pub fn simulate_move(board: &Board, column: usize, player: Player) -> Result<Board, GameError> {
    board.execute_move(column, player)
}

pub fn check_winner(board: &Board) -> Option<Win> {
    board.check_winner()
}

pub fn is_board_full(board: &Board) -> bool {
    board.is_full()
}
