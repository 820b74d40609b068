use log::trace;

use crate::board::Board;
use crate::error::{ConfigError, TableError};
use crate::transposition::{Record, TranspositionTable, DEFAULT_CAPACITY};
use crate::evaluation::Score;

/// Game parameters for one session: the board, the winning run and how deep
/// the search may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub win_length: usize,
    pub max_levels: u32,
    pub table_capacity: usize,
}

impl GameConfig {
    pub fn new(board_size: usize, win_length: usize, max_levels: u32) -> Result<Self, ConfigError> {
        if board_size == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        if win_length == 0 {
            return Err(ConfigError::ZeroWinLength);
        }
        Ok(Self {
            board_size,
            win_length,
            max_levels,
            table_capacity: DEFAULT_CAPACITY,
        })
    }

    pub fn with_table_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroTableCapacity);
        }
        self.table_capacity = capacity;
        Ok(self)
    }

    pub fn new_board(&self) -> Board {
        Board::new(self.board_size, self.win_length)
    }

    /// Empty memoization table for one search session.
    pub fn create_dictionary(&self) -> Result<TranspositionTable, TableError> {
        TranspositionTable::new(self.table_capacity)
    }

    /// Score code cached for the board's current configuration, or
    /// [`crate::transposition::NOT_FOUND`].
    pub fn repeated_configuration(&self, board: &Board, table: &TranspositionTable) -> i32 {
        table.get(&board.encode())
    }

    /// Cache `score` for the board's current configuration. Returns whether
    /// the insert collided.
    pub fn add_configuration(
        &self,
        board: &Board,
        table: &mut TranspositionTable,
        score: Score,
    ) -> Result<bool, TableError> {
        let key = board.encode();
        trace!("caching {:?} as {}", key, score);
        table.put(Record::new(key, score))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            win_length: 3,
            max_levels: 9,
            table_capacity: DEFAULT_CAPACITY,
        }
    }
}
