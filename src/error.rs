//! Errors from the parts of the program that touch the outside world

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DonutError {
    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write snapshot {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DonutError>;
