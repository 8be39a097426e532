//! Read options and their resolution.
//!
//! Options come from three tiers, highest priority first:
//! 1. **Per call** - [`ReadOptions`] passed to a single read
//! 2. **Reader defaults** - [`ReaderOptions`] held by the [`Reader`](crate::Reader)
//! 3. **Built-ins** - the process environment, and `tracing` info/error sinks
//!
//! Resolution is field by field; a field set at a higher tier always wins.

use crate::logging::{self, Sink};
use crate::source::{ProcessEnv, Source};
use crate::validator::Validator;
use std::fmt;
use std::sync::Arc;

/// Defaults held by a reader and applied under every call's options.
#[derive(Clone, Default)]
pub struct ReaderOptions {
    pub source: Option<Arc<dyn Source>>,
    /// Applied to string and URL reads that bring no validator of their own.
    pub validator: Option<Validator>,
    pub log: Option<Sink>,
    pub error: Option<Sink>,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Use an already shared source, e.g. one handed to several readers.
    pub fn with_shared_source(mut self, source: Arc<dyn Source>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    pub fn with_log(mut self, log: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Some(Arc::new(log));
        self
    }

    pub fn with_log_sink(mut self, log: Sink) -> Self {
        self.log = Some(log);
        self
    }

    pub fn with_error(mut self, error: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.error = Some(Arc::new(error));
        self
    }

    pub fn with_error_sink(mut self, error: Sink) -> Self {
        self.error = Some(error);
        self
    }
}

impl fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("source", &self.source.as_ref().map(|_| ".."))
            .field("validator", &self.validator)
            .field("log", &self.log.as_ref().map(|_| ".."))
            .field("error", &self.error.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Options for a single read.
///
/// A bare value converts into options carrying only that default, so
/// `reader.read_string_with("KEY", "fallback")` reads `KEY` with a default
/// of `"fallback"`.
#[derive(Clone)]
pub struct ReadOptions<T> {
    pub source: Option<Arc<dyn Source>>,
    pub default_value: Option<T>,
    /// Only consulted by the string and URL readers.
    pub validator: Option<Validator>,
    pub log: Option<Sink>,
    pub error: Option<Sink>,
}

impl<T> Default for ReadOptions<T> {
    fn default() -> Self {
        Self {
            source: None,
            default_value: None,
            validator: None,
            log: None,
            error: None,
        }
    }
}

impl<T> ReadOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: impl Into<T>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn with_shared_source(mut self, source: Arc<dyn Source>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_log(mut self, log: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Some(Arc::new(log));
        self
    }

    pub fn with_error(mut self, error: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.error = Some(Arc::new(error));
        self
    }
}

impl<T> From<T> for ReadOptions<T> {
    fn from(value: T) -> Self {
        Self {
            default_value: Some(value),
            ..Self::default()
        }
    }
}

impl From<&str> for ReadOptions<String> {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("source", &self.source.as_ref().map(|_| ".."))
            .field("default_value", &self.default_value)
            .field("validator", &self.validator)
            .field("log", &self.log.as_ref().map(|_| ".."))
            .field("error", &self.error.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Fully resolved options; every field a reader needs is present.
#[derive(Clone)]
pub(crate) struct Resolved<T> {
    pub source: Arc<dyn Source>,
    pub default_value: Option<T>,
    pub validator: Option<Validator>,
    pub log: Sink,
    pub error: Sink,
}

/// Merge per-call options over reader defaults over built-ins.
pub(crate) fn resolve<T>(options: ReadOptions<T>, defaults: &ReaderOptions) -> Resolved<T> {
    Resolved {
        source: options
            .source
            .or_else(|| defaults.source.clone())
            .unwrap_or_else(|| Arc::new(ProcessEnv)),
        default_value: options.default_value,
        validator: options.validator.or_else(|| defaults.validator.clone()),
        log: options
            .log
            .or_else(|| defaults.log.clone())
            .unwrap_or_else(logging::info_sink),
        error: options
            .error
            .or_else(|| defaults.error.clone())
            .unwrap_or_else(logging::error_sink),
    }
}
