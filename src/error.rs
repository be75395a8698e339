use thiserror::Error;

use crate::language::WordSourceError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    WordSource(#[from] WordSourceError),

    #[error("invalid mode: {0} (must be 'time' or 'word')")]
    InvalidMode(String),

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: u64,
        max: u64,
        value: u64,
    },

    #[error("invalid key binding: '{0}'")]
    InvalidKeyBinding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
