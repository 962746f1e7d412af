//! Win/loss record for the human player. Storage is a collaborator behind
//! [`StatsStore`]; the core never touches files or the network.
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::Player;
use crate::error::GameError;
use crate::state::{GameState, GameStatus};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_streak: u32,
    pub longest_win_streak: u32,
    /// Fewest moves (both sides counted) in any win.
    pub fastest_win: Option<u32>,
    pub total_games: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::named(DEFAULT_PLAYER_NAME)
    }
}

impl PlayerStats {
    pub fn named(name: &str) -> Self {
        Self {
            player_name: name.to_string(),
            wins: 0,
            losses: 0,
            draws: 0,
            win_streak: 0,
            longest_win_streak: 0,
            fastest_win: None,
            total_games: 0,
        }
    }

    pub fn record_win(&mut self, moves: u32) {
        self.wins += 1;
        self.win_streak += 1;
        self.longest_win_streak = self.longest_win_streak.max(self.win_streak);
        self.fastest_win = Some(self.fastest_win.map_or(moves, |best| best.min(moves)));
        self.total_games += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
        self.win_streak = 0;
        self.total_games += 1;
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
        self.win_streak = 0;
        self.total_games += 1;
    }

    /// Records a finished game from player 1's side. Games still in
    /// progress are ignored; returns whether anything was recorded.
    pub fn record_outcome(&mut self, state: &GameState) -> bool {
        match (state.status(), state.winner()) {
            (GameStatus::Won, Some(Player::One)) => {
                self.record_win(state.move_history().len() as u32)
            }
            (GameStatus::Won, _) => self.record_loss(),
            (GameStatus::Draw, _) => self.record_draw(),
            (GameStatus::Playing, _) => return false,
        }
        true
    }

    pub fn rename(&mut self, name: &str) {
        let name = name.trim();
        self.player_name = if name.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    /// Clears the record, keeping the name.
    pub fn reset(&mut self) {
        *self = Self::named(&self.player_name);
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.fastest_win == Some(0) {
            return Err(GameError::InvalidStats(
                "fastestWin must be positive".into(),
            ));
        }
        if self.longest_win_streak < self.win_streak {
            return Err(GameError::InvalidStats(format!(
                "longestWinStreak {} is below winStreak {}",
                self.longest_win_streak, self.win_streak
            )));
        }
        Ok(())
    }
}

/// Somewhere to keep [`PlayerStats`] between sessions.
pub trait StatsStore {
    type Error: std::fmt::Display;

    fn load(&self) -> Result<Option<PlayerStats>, Self::Error>;
    fn save(&self, stats: &PlayerStats) -> Result<(), Self::Error>;
}

/// Loads stored stats, falling back to defaults when nothing is stored or
/// the stored record is unreadable or fails validation.
pub fn load_or_default<S: StatsStore>(store: &S) -> PlayerStats {
    match store.load() {
        Ok(Some(stats)) => match stats.validate() {
            Ok(()) => stats,
            Err(err) => {
                warn!(%err, "discarding stored stats");
                PlayerStats::default()
            }
        },
        Ok(None) => PlayerStats::default(),
        Err(err) => {
            warn!(%err, "failed to load stats");
            PlayerStats::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: Mutex<Option<PlayerStats>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStore {
    type Error = GameError;

    fn load(&self) -> Result<Option<PlayerStats>, GameError> {
        let guard = self
            .stats
            .lock()
            .map_err(|_| GameError::InvalidStats("store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, stats: &PlayerStats) -> Result<(), GameError> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|_| GameError::InvalidStats("store lock poisoned".into()))?;
        *guard = Some(stats.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{parse_history, Difficulty, GameMode};

    fn replay(history: &str) -> GameState {
        let columns = parse_history(history).unwrap();
        GameState::replay(GameMode::Pvc, Difficulty::Easy, &columns).unwrap()
    }

    #[test]
    fn wins_extend_streaks_and_track_fastest() {
        let mut stats = PlayerStats::default();
        stats.record_win(15);
        stats.record_win(9);
        stats.record_win(21);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.win_streak, 3);
        assert_eq!(stats.longest_win_streak, 3);
        assert_eq!(stats.fastest_win, Some(9));
        assert_eq!(stats.total_games, 3);
    }

    #[test]
    fn losses_and_draws_break_the_streak() {
        let mut stats = PlayerStats::default();
        stats.record_win(7);
        stats.record_win(7);
        stats.record_loss();
        assert_eq!(stats.win_streak, 0);
        assert_eq!(stats.longest_win_streak, 2);
        stats.record_win(11);
        stats.record_draw();
        assert_eq!(stats.win_streak, 0);
        assert_eq!((stats.wins, stats.losses, stats.draws), (3, 1, 1));
        assert_eq!(stats.total_games, 5);
    }

    #[test]
    fn records_finished_games_only() {
        let mut stats = PlayerStats::default();
        let playing = replay("3");
        assert!(!stats.record_outcome(&playing));

        let won = replay("0101010");
        assert!(stats.record_outcome(&won));
        assert_eq!(stats.fastest_win, Some(7));

        let lost = replay("60101010");
        assert!(stats.record_outcome(&lost));
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.total_games, 2);
    }

    #[test]
    fn rename_falls_back_to_default() {
        let mut stats = PlayerStats::named("Ada");
        stats.rename("   ");
        assert_eq!(stats.player_name, DEFAULT_PLAYER_NAME);
        stats.rename("Grace");
        stats.record_win(8);
        stats.reset();
        assert_eq!(stats, PlayerStats::named("Grace"));
    }

    #[test]
    fn validation_rejects_impossible_records() {
        let mut stats = PlayerStats::default();
        assert!(stats.validate().is_ok());
        stats.fastest_win = Some(0);
        assert!(stats.validate().is_err());
        stats.fastest_win = None;
        stats.win_streak = 4;
        assert!(stats.validate().is_err());
    }

    #[test]
    fn corrupt_store_falls_back_to_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_or_default(&store), PlayerStats::default());

        let mut stats = PlayerStats::named("Lin");
        stats.record_win(10);
        store.save(&stats).unwrap();
        assert_eq!(load_or_default(&store), stats);

        stats.win_streak = 9;
        store.save(&stats).unwrap();
        assert_eq!(load_or_default(&store), PlayerStats::default());
    }

    #[test]
    fn stats_json_uses_camel_case() {
        let json = serde_json::to_value(PlayerStats::default()).unwrap();
        assert_eq!(json["playerName"], "Player");
        assert!(json["fastestWin"].is_null());
        assert_eq!(json["longestWinStreak"], 0);
    }
}
