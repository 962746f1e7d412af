use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const WIN_LENGTH: usize = 4;
pub const CENTER_COLUMN: usize = COLUMNS / 2;

/// Line directions as (row step, column step), in the order the winner scan
/// tries them: rightward, downward, down-right, down-left.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        match player {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A completed line: who made it and the four cells, in the order the scan
/// walked them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Win {
    pub winner: Player,
    pub winning_cells: [Position; WIN_LENGTH],
}

/// The 6x7 grid. Row 0 is the top row; discs settle at the highest empty
/// row index of their column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Player>; COLUMNS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; COLUMNS]; ROWS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[row][col]
    }

    pub fn disc_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Out-of-range columns report as full so they are never playable.
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= COLUMNS || self.cells[0][column].is_some()
    }

    pub fn lowest_available_row(&self, column: usize) -> Option<usize> {
        if column >= COLUMNS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][column].is_none())
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < COLUMNS && !self.is_column_full(column)
    }

    pub fn valid_moves(&self) -> Vec<usize> {
        (0..COLUMNS).filter(|&col| self.is_valid_move(col)).collect()
    }

    /// Returns a copy of the board with `player`'s disc dropped into `column`.
    pub fn execute_move(&self, column: usize, player: Player) -> Result<Board, GameError> {
        if column >= COLUMNS {
            return Err(GameError::ColumnOutOfBounds { column });
        }
        let row = self
            .lowest_available_row(column)
            .ok_or(GameError::ColumnFull { column })?;
        let mut next = *self;
        next.cells[row][column] = Some(player);
        Ok(next)
    }

    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(Option::is_some)
    }

    /// Scans row-major from the top-left; for each disc tries the four
    /// directions in `DIRECTIONS` order and reports the first complete line.
    pub fn check_winner(&self) -> Option<Win> {
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                let Some(player) = self.cells[row][col] else {
                    continue;
                };
                for dir in DIRECTIONS {
                    if let Some(winning_cells) = self.line_from(row, col, dir, player) {
                        return Some(Win {
                            winner: player,
                            winning_cells,
                        });
                    }
                }
            }
        }
        None
    }

    fn line_from(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        player: Player,
    ) -> Option<[Position; WIN_LENGTH]> {
        let mut line = [Position::new(row, col); WIN_LENGTH];
        for (i, slot) in line.iter_mut().enumerate() {
            let (r, c) = step(row, col, dr, dc, i)?;
            if self.cells[r][c] != Some(player) {
                return None;
            }
            *slot = Position::new(r, c);
        }
        Some(line)
    }

    /// Length of the run of `player` discs starting at (row, col) and walking
    /// in `dir`, including the start cell.
    pub fn count_consecutive(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        player: Player,
    ) -> usize {
        (0..)
            .map_while(|i| step(row, col, dr, dc, i))
            .take_while(|&(r, c)| self.cells[r][c] == Some(player))
            .count()
    }

    pub fn has_n_in_a_row(&self, player: Player, n: usize) -> bool {
        (0..ROWS).any(|row| {
            (0..COLUMNS).any(|col| {
                self.cells[row][col] == Some(player)
                    && DIRECTIONS
                        .iter()
                        .any(|&dir| self.count_consecutive(row, col, dir, player) >= n)
            })
        })
    }
}

fn step(row: usize, col: usize, dr: isize, dc: isize, i: usize) -> Option<(usize, usize)> {
    let r = row as isize + dr * i as isize;
    let c = col as isize + dc * i as isize;
    if r < 0 || c < 0 || r >= ROWS as isize || c >= COLUMNS as isize {
        return None;
    }
    Some((r as usize, c as usize))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..COLUMNS {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "{i}")?;
            for cell in row {
                match cell {
                    Some(player) => write!(f, " {player}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
