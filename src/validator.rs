//! Pattern validators for string-like readers.

use crate::error::{EnvReadError, Result};
use regex_lite::Regex;
use std::fmt;
use std::str::FromStr;

/// A compiled pattern a raw value must match.
///
/// Built either from an already compiled [`Regex`] or from pattern source
/// text. A malformed pattern is a programming error in the caller's options,
/// so it is reported when the validator is built rather than at read time.
/// Renders as `/pattern/` in messages.
#[derive(Debug, Clone)]
pub struct Validator(Regex);

impl Validator {
    /// Compile a validator from pattern source.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|err| EnvReadError::invalid_pattern(pattern, err))
    }

    /// Check whether `value` matches anywhere.
    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Regex> for Validator {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl FromStr for Validator {
    type Err = EnvReadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Validator {
    type Error = EnvReadError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Validator {
    type Error = EnvReadError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0.as_str())
    }
}
