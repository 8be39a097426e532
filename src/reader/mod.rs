//! Typed environment readers.
//!
//! A [`Reader`] looks keys up in a [`Source`](crate::source::Source), parses
//! and validates what it finds, logs what it used (masking secrets), and
//! reports what it could not use. Failed reads return `None` and set the
//! reader's missing-variable flag, so startup code can issue every read and
//! then decide once whether to abort:
//!
//! ```
//! use envread::{Reader, ReaderOptions};
//! use envread::source::from_pairs;
//!
//! let reader = Reader::with_defaults(
//!     ReaderOptions::new()
//!         .with_source(from_pairs([("PORT", "8080"), ("DB_PASSWORD", "hunter22")]))
//!         .with_log(|_| {})
//!         .with_error(|_| {}),
//! );
//!
//! let port = reader.read_number("PORT");
//! let password = reader.read_password("DB_PASSWORD");
//! let user = reader.read_string_with(["CURRENT_USER", "DEFAULT_USER"], "nobody");
//! let host = reader.read_string("DB_HOST");
//!
//! assert_eq!(port, Some(8080));
//! assert_eq!(password.as_deref(), Some("hunter22"));
//! assert_eq!(user.as_deref(), Some("nobody"));
//! assert_eq!(host, None);
//! assert!(reader.missing_env_vars());
//! ```

mod fallback;
mod global;
mod kinds;

pub use global::{
    global, missing_env_vars, read_bool, read_bool_with, read_certificate, read_certificate_with,
    read_number, read_number_with, read_password, read_password_with, read_string,
    read_string_with, read_url, read_url_with, set_default_options,
};
pub use kinds::parse_bool;

use crate::options::{ReadOptions, ReaderOptions, Resolved, resolve};
use arc_swap::ArcSwap;
use kinds::{BoolKind, CertificateKind, Kind, NumberKind, PasswordKind, StringKind, UrlKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// What to read: one key, or candidates tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Single(String),
    Candidates(Vec<String>),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key::Single(key.to_owned())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key::Single(key)
    }
}

impl From<&String> for Key {
    fn from(key: &String) -> Self {
        Key::Single(key.clone())
    }
}

impl From<Vec<String>> for Key {
    fn from(keys: Vec<String>) -> Self {
        Key::Candidates(keys)
    }
}

impl From<Vec<&str>> for Key {
    fn from(keys: Vec<&str>) -> Self {
        Key::Candidates(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Key {
    fn from(keys: &[&str]) -> Self {
        Key::Candidates(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Key {
    fn from(keys: [&str; N]) -> Self {
        Key::Candidates(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

/// Owner of reads: default options plus the missing-variable flag.
///
/// Each reader tracks its own flag, so unrelated readers in one process do
/// not see each other's failures. The flag only ever goes from `false` to
/// `true`.
pub struct Reader {
    defaults: ArcSwap<ReaderOptions>,
    missing_env_vars: AtomicBool,
}

impl Reader {
    /// Reader using the process environment and `tracing` sinks.
    pub fn new() -> Self {
        Self::with_defaults(ReaderOptions::default())
    }

    pub fn with_defaults(defaults: ReaderOptions) -> Self {
        Self {
            defaults: ArcSwap::from_pointee(defaults),
            missing_env_vars: AtomicBool::new(false),
        }
    }

    /// Current default options.
    pub fn default_options(&self) -> Arc<ReaderOptions> {
        self.defaults.load_full()
    }

    /// Replace the default options for subsequent reads.
    pub fn set_default_options(&self, defaults: ReaderOptions) {
        self.defaults.store(Arc::new(defaults));
    }

    /// Whether any read on this reader has failed to produce a value.
    pub fn missing_env_vars(&self) -> bool {
        self.missing_env_vars.load(Ordering::Acquire)
    }

    fn mark_missing(&self) {
        self.missing_env_vars.fetch_or(true, Ordering::AcqRel);
    }

    pub fn read_string(&self, key: impl Into<Key>) -> Option<String> {
        self.read::<StringKind>(key.into(), ReadOptions::default())
    }

    /// Read a string, checked against the validator if one is given.
    pub fn read_string_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<String>>,
    ) -> Option<String> {
        self.read::<StringKind>(key.into(), options.into())
    }

    pub fn read_number(&self, key: impl Into<Key>) -> Option<i64> {
        self.read::<NumberKind>(key.into(), ReadOptions::default())
    }

    /// Read a base-10 integer. Text that does not render back identically
    /// (`"05"`, `"+5"`, `"1e3"`) is rejected.
    pub fn read_number_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<i64>>,
    ) -> Option<i64> {
        self.read::<NumberKind>(key.into(), options.into())
    }

    pub fn read_bool(&self, key: impl Into<Key>) -> Option<bool> {
        self.read::<BoolKind>(key.into(), ReadOptions::default())
    }

    /// Read a boolean; see [`parse_bool`] for accepted words.
    pub fn read_bool_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<bool>>,
    ) -> Option<bool> {
        self.read::<BoolKind>(key.into(), options.into())
    }

    pub fn read_password(&self, key: impl Into<Key>) -> Option<String> {
        self.read::<PasswordKind>(key.into(), ReadOptions::default())
    }

    /// Read a secret. Logged values are masked; validators are ignored.
    pub fn read_password_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<String>>,
    ) -> Option<String> {
        self.read::<PasswordKind>(key.into(), options.into())
    }

    pub fn read_certificate(&self, key: impl Into<Key>) -> Option<String> {
        self.read::<CertificateKind>(key.into(), ReadOptions::default())
    }

    /// Read a PEM certificate. Logged values are collapsed and masked.
    pub fn read_certificate_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<String>>,
    ) -> Option<String> {
        self.read::<CertificateKind>(key.into(), options.into())
    }

    pub fn read_url(&self, key: impl Into<Key>) -> Option<String> {
        self.read::<UrlKind>(key.into(), ReadOptions::default())
    }

    /// Read a URL. Embedded passwords are masked in log lines only; the
    /// returned text is the unmodified value.
    pub fn read_url_with(
        &self,
        key: impl Into<Key>,
        options: impl Into<ReadOptions<String>>,
    ) -> Option<String> {
        self.read::<UrlKind>(key.into(), options.into())
    }

    fn read<K: Kind>(&self, key: Key, options: ReadOptions<K::Value>) -> Option<K::Value> {
        let defaults = self.defaults.load();
        let resolved = resolve(options, &defaults);
        match key {
            Key::Single(key) => {
                let value = read_single::<K>(&key, &resolved);
                if value.is_none() {
                    self.mark_missing();
                }
                value
            }
            Key::Candidates(keys) => {
                let value = fallback::read_candidates::<K>(&keys, &resolved);
                if value.is_none() {
                    self.mark_missing();
                }
                value
            }
        }
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("defaults", &self.default_options())
            .field("missing_env_vars", &self.missing_env_vars())
            .finish()
    }
}

/// Look up, validate and parse one key, logging the outcome.
///
/// Returns `None` when nothing usable was found and no default applies; the
/// error line has been reported by then.
fn read_single<K: Kind>(key: &str, options: &Resolved<K::Value>) -> Option<K::Value> {
    let Some(raw) = options.source.get(key) else {
        return match &options.default_value {
            Some(value) => {
                (options.log)(&format!("{} {key} {}", K::DEFAULT_PREFIX, K::display(value)));
                Some(value.clone())
            }
            None => {
                (options.error)(&format!(
                    "Required {} env var \"{key}\" was not supplied.",
                    K::REQUIRED_LABEL
                ));
                None
            }
        };
    };

    if K::VALIDATES {
        if let Some(validator) = &options.validator {
            if !validator.is_match(&raw) {
                debug!(key, pattern = validator.as_str(), "validator rejected value");
                (options.error)(&format!(
                    "Expected env var \"{key}\" to be match pattern \"{validator}\" but was \"{}\" and did not.",
                    K::display_raw(&raw)
                ));
                return None;
            }
        }
    }

    match K::parse(key, &raw) {
        Ok(value) => {
            (options.log)(&format!("Using env var {key} {}", K::display(&value)));
            Some(value)
        }
        Err(message) => {
            (options.error)(&message);
            None
        }
    }
}
