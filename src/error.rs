//! Error types for grammar definition and word list loading

use crate::Category;
use thiserror::Error;

/// Result type alias for grammar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before tokenization starts.
/// Tokenization itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid {category} pattern `{pattern}`: {source}")]
    Pattern {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid word list: {0}")]
    Config(String),

    #[error("no such grammar: {0}")]
    UnknownGrammar(String),
}
