//! Error types shared across the crate

use std::path::PathBuf;

/// Crate result type
pub type Result<T> = std::result::Result<T, GrnError>;

/// Errors raised by genome handling, configuration and report I/O
#[derive(Debug, thiserror::Error)]
pub enum GrnError {
    #[error("malformed genome: 32-bit window at bit {bit_offset} runs past the end of {word_count} words")]
    MalformedGenome { bit_offset: usize, word_count: usize },

    #[error("cannot access {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("token {position} ('{token}') is not a 32-bit integer")]
    InvalidWord { token: String, position: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GrnError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GrnError::SourceUnreadable {
            path: path.into(),
            source,
        }
    }
}
