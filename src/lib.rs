//! Typed environment variable reader.
//!
//! Pulls strings, numbers, booleans, passwords, certificates and URLs out of
//! the environment (or any key/value [`Source`](source::Source)), validates
//! them, logs what was used with secrets masked, and records whether anything
//! required was missing. Resolved values can be assembled into a frozen,
//! clonable [`object::Object`].

pub mod cli;
pub mod error;
pub mod logging;
pub mod obfuscate;
pub mod object;
pub mod options;
pub mod reader;
pub mod source;
pub mod validator;

pub use error::{EnvReadError, Result};
pub use obfuscate::{obfuscate, obfuscate_auth, obfuscate_certificate};
pub use object::{
    Object, Value, deep_clone, deep_freeze, make_clonable, make_clonable_and_deep_freeze,
};
pub use options::{ReadOptions, ReaderOptions};
pub use reader::{Key, Reader};
pub use validator::Validator;
