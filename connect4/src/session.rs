//! Drives one game at a time for a front end: human moves, the computer's
//! reply in `pvc` mode, restarts and difficulty changes.
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::ai::get_ai_move_with_rng;
use crate::board::Player;
use crate::error::GameError;
use crate::state::{Difficulty, GameMode, GameState};

/// The computer always plays second.
pub const COMPUTER: Player = Player::Two;

pub struct Session {
    state: GameState,
    rng: StdRng,
}

impl Session {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self::with_rng(mode, difficulty, StdRng::from_os_rng())
    }

    /// Reproducible session for tests and replays.
    pub fn with_seed(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(mode, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: GameMode, difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            state: GameState::new(mode, difficulty),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn computer_to_move(&self) -> bool {
        self.state.mode() == GameMode::Pvc
            && self.state.is_in_progress()
            && self.state.current_player() == COMPUTER
    }

    /// Applies a human move. On error the state is left as it was.
    pub fn play(&mut self, column: usize) -> Result<&GameState, GameError> {
        if self.computer_to_move() {
            return Err(GameError::NotYourTurn);
        }
        match self.state.make_move(column) {
            Ok(next) => {
                self.state = next;
                Ok(&self.state)
            }
            Err(err) => {
                debug!(column, %err, "rejected move");
                Err(err)
            }
        }
    }

    /// Lets the computer reply if it is its turn; returns the column played.
    pub fn computer_move(&mut self) -> Result<Option<usize>, GameError> {
        if !self.computer_to_move() {
            return Ok(None);
        }
        let column = get_ai_move_with_rng(
            self.state.board(),
            COMPUTER,
            self.state.difficulty(),
            &mut self.rng,
        )?;
        self.state = self.state.make_move(column)?;
        Ok(Some(column))
    }

    pub fn play_against_computer(&mut self, column: usize) -> Result<Option<usize>, GameError> {
        self.play(column)?;
        self.computer_move()
    }

    /// Starts over; keeps the current difficulty unless one is given.
    pub fn new_game(&mut self, mode: GameMode, difficulty: Option<Difficulty>) {
        let difficulty = difficulty.unwrap_or(self.state.difficulty());
        self.state = GameState::new(mode, difficulty);
    }

    pub fn reset(&mut self) {
        self.new_game(self.state.mode(), None);
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.state = self.state.clone().with_difficulty(difficulty);
    }
}
