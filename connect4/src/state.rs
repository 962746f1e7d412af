use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Position, COLUMNS, WIN_LENGTH};
use crate::error::GameError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Draw,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans sharing the board.
    Pvp,
    /// Human (player 1) against the computer (player 2).
    #[default]
    Pvc,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub player: Player,
}

/// Status derived purely from a board.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub status: GameStatus,
    pub winner: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_cells: Option<[Position; WIN_LENGTH]>,
}

/// A winner takes precedence over a full board.
pub fn evaluate_game_state(board: &Board) -> Evaluation {
    if let Some(win) = board.check_winner() {
        return Evaluation {
            status: GameStatus::Won,
            winner: Some(win.winner),
            winning_cells: Some(win.winning_cells),
        };
    }
    let status = if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Playing
    };
    Evaluation {
        status,
        winner: None,
        winning_cells: None,
    }
}

/// One game from the first disc to its end. The only transition is
/// [`GameState::make_move`], which returns a new state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    winner: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    winning_cells: Option<[Position; WIN_LENGTH]>,
    mode: GameMode,
    difficulty: Difficulty,
    move_history: Vec<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_move: Option<Position>,
}

impl GameState {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::One,
            status: GameStatus::Playing,
            winner: None,
            winning_cells: None,
            mode,
            difficulty,
            move_history: Vec::new(),
            last_move: None,
        }
    }

    /// Plays `columns` in order from a fresh game, alternating players.
    pub fn replay(
        mode: GameMode,
        difficulty: Difficulty,
        columns: &[usize],
    ) -> Result<Self, GameError> {
        columns
            .iter()
            .try_fold(Self::new(mode, difficulty), |state, &col| state.make_move(col))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn winning_cells(&self) -> Option<&[Position; WIN_LENGTH]> {
        self.winning_cells.as_ref()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }

    /// Drops the current player's disc into `column`. The turn passes only
    /// while the game stays in progress; a winning or board-filling move
    /// leaves `current_player` on the player who made it.
    pub fn make_move(&self, column: usize) -> Result<GameState, GameError> {
        if !self.is_in_progress() {
            return Err(GameError::GameOver);
        }
        if column >= COLUMNS {
            return Err(GameError::ColumnOutOfBounds { column });
        }
        let row = self
            .board
            .lowest_available_row(column)
            .ok_or(GameError::ColumnFull { column })?;

        let player = self.current_player;
        let board = self.board.execute_move(column, player)?;
        let evaluation = evaluate_game_state(&board);

        let current_player = if evaluation.status == GameStatus::Playing {
            player.opponent()
        } else {
            player
        };
        let mut move_history = self.move_history.clone();
        move_history.push(Move { column, player });

        Ok(GameState {
            board,
            current_player,
            status: evaluation.status,
            winner: evaluation.winner,
            winning_cells: evaluation.winning_cells,
            mode: self.mode,
            difficulty: self.difficulty,
            move_history,
            last_move: Some(Position::new(row, column)),
        })
    }
}

/// Parses a history such as `"3344"`: one column digit per move, players
/// alternating from player 1. Whitespace is skipped.
pub fn parse_history(history: &str) -> Result<Vec<usize>, GameError> {
    let mut columns = Vec::new();
    for (position, ch) in history.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let Some(column) = ch.to_digit(10) else {
            return Err(GameError::ParseMove {
                position,
                reason: format!("expected column digit, found {ch}"),
            });
        };
        let column = column as usize;
        if column >= COLUMNS {
            return Err(GameError::ParseMove {
                position,
                reason: format!("column must be 0-{}", COLUMNS - 1),
            });
        }
        columns.push(column);
    }
    Ok(columns)
}
