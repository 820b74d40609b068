use thiserror::Error;

/// Misuse of the memoization table by its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("configuration {0:?} is already stored")]
    DuplicateKey(String),

    #[error("configuration {0:?} is not stored")]
    NotFound(String),

    #[error("table capacity must be at least one bucket")]
    ZeroCapacity,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be at least 1")]
    ZeroBoardSize,

    #[error("winning run length must be at least 1")]
    ZeroWinLength,

    #[error("table capacity must be at least 1")]
    ZeroTableCapacity,
}

/// Errors reported back to whoever is typing commands.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("square ({row}, {col}) is off the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("square ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },

    #[error("the game is over, start a new one with `new`")]
    GameOver,

    #[error(transparent)]
    Table(#[from] TableError),
}
