//! Process-wide reader and free-function read operations.
//!
//! The free functions are shorthands for the same calls on [`global()`],
//! which shares one missing-variable flag and one set of default options
//! across the whole process.

use super::{Key, Reader};
use crate::options::{ReadOptions, ReaderOptions};
use std::sync::LazyLock;

static GLOBAL: LazyLock<Reader> = LazyLock::new(Reader::new);

/// The process-wide reader.
pub fn global() -> &'static Reader {
    &GLOBAL
}

/// Whether any read on the process-wide reader has failed.
pub fn missing_env_vars() -> bool {
    GLOBAL.missing_env_vars()
}

/// Replace the process-wide default options.
pub fn set_default_options(defaults: ReaderOptions) {
    GLOBAL.set_default_options(defaults);
}

pub fn read_string(key: impl Into<Key>) -> Option<String> {
    GLOBAL.read_string(key)
}

pub fn read_string_with(
    key: impl Into<Key>,
    options: impl Into<ReadOptions<String>>,
) -> Option<String> {
    GLOBAL.read_string_with(key, options)
}

pub fn read_number(key: impl Into<Key>) -> Option<i64> {
    GLOBAL.read_number(key)
}

pub fn read_number_with(key: impl Into<Key>, options: impl Into<ReadOptions<i64>>) -> Option<i64> {
    GLOBAL.read_number_with(key, options)
}

pub fn read_bool(key: impl Into<Key>) -> Option<bool> {
    GLOBAL.read_bool(key)
}

pub fn read_bool_with(key: impl Into<Key>, options: impl Into<ReadOptions<bool>>) -> Option<bool> {
    GLOBAL.read_bool_with(key, options)
}

pub fn read_password(key: impl Into<Key>) -> Option<String> {
    GLOBAL.read_password(key)
}

pub fn read_password_with(
    key: impl Into<Key>,
    options: impl Into<ReadOptions<String>>,
) -> Option<String> {
    GLOBAL.read_password_with(key, options)
}

pub fn read_certificate(key: impl Into<Key>) -> Option<String> {
    GLOBAL.read_certificate(key)
}

pub fn read_certificate_with(
    key: impl Into<Key>,
    options: impl Into<ReadOptions<String>>,
) -> Option<String> {
    GLOBAL.read_certificate_with(key, options)
}

pub fn read_url(key: impl Into<Key>) -> Option<String> {
    GLOBAL.read_url(key)
}

pub fn read_url_with(
    key: impl Into<Key>,
    options: impl Into<ReadOptions<String>>,
) -> Option<String> {
    GLOBAL.read_url_with(key, options)
}
