use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("game is already over")]
    GameOver,
    #[error("no legal moves remain")]
    NoMoves,
    #[error("{0} is not a player (expected 1 or 2)")]
    InvalidPlayer(u8),
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("it is not the human player's turn")]
    NotYourTurn,
    #[error("invalid statistics: {0}")]
    InvalidStats(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_column() {
        assert_eq!(
            GameError::ColumnFull { column: 4 }.to_string(),
            "column 4 is full"
        );
        assert_eq!(
            GameError::InvalidPlayer(3).to_string(),
            "3 is not a player (expected 1 or 2)"
        );
    }
}
