//! Error types for the library surface.
//!
//! Environment problems are never errors here: a failed read reports through
//! the reader's error sink and flips its missing-variable flag. What remains
//! are programming mistakes in the caller's own inputs.

use thiserror::Error;

/// Errors returned by fallible library operations.
#[derive(Debug, Error)]
pub enum EnvReadError {
    /// A validator pattern could not be compiled.
    #[error("invalid validator pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    /// A value graph contains a cycle and cannot be rendered as JSON.
    #[error("value graph contains a cycle at \"{path}\"")]
    CyclicValue { path: String },
}

impl EnvReadError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex_lite::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn cyclic_value(path: impl Into<String>) -> Self {
        Self::CyclicValue { path: path.into() }
    }
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, EnvReadError>;
