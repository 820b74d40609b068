pub mod board;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod transposition;

pub use board::{Board, Cell, Symbol};
pub use config::GameConfig;
pub use error::{ConfigError, ProtocolError, TableError};
pub use evaluation::Score;
pub use search::Search;
pub use transposition::{Record, TranspositionTable, DEFAULT_CAPACITY, NOT_FOUND};
