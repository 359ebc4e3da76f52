use std::path::PathBuf;

/// Errors raised while building a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("starting word must be {expected} letters, got {actual}")]
    StartingWordLength { expected: usize, actual: usize },

    #[error("'{0}' is not a letter")]
    InvalidLetter(char),

    #[error("board rows must all be {expected} cells wide, row {row} has {actual}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised by the word dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("word list is empty")]
    Empty,

    #[error("word list has not been loaded")]
    NotLoaded,

    #[error("no {length}-letter word among the {pool_size} most common words")]
    NoWordOfLength { length: usize, pool_size: usize },
}

/// Errors raised by the key/value storage behind the settings.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while starting or restarting a game.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
