//! Per-type parsing and message wording.

use crate::obfuscate::{obfuscate, obfuscate_auth, obfuscate_certificate};

/// How one value type is parsed from raw text and rendered in messages.
pub(crate) trait Kind {
    type Value: Clone;

    /// Type name in "Required ... env var" errors.
    const REQUIRED_LABEL: &'static str;
    /// Type name in fallback messages ("Could not use ..." and "required ...s").
    const CANDIDATE_LABEL: &'static str;
    /// Prefix of the message logged when the default value is used.
    const DEFAULT_PREFIX: &'static str = "Using default";
    /// Whether a validator pattern is applied to the raw value.
    const VALIDATES: bool = false;

    /// Parse raw text, or return the error line for `key`.
    fn parse(key: &str, raw: &str) -> Result<Self::Value, String>;

    /// Render a parsed value for logging.
    fn display(value: &Self::Value) -> String;

    /// Render raw text for inclusion in error lines.
    fn display_raw(raw: &str) -> String {
        raw.to_owned()
    }
}

pub(crate) struct StringKind;

impl Kind for StringKind {
    type Value = String;
    const REQUIRED_LABEL: &'static str = "string";
    const CANDIDATE_LABEL: &'static str = "string";
    const VALIDATES: bool = true;

    fn parse(_key: &str, raw: &str) -> Result<String, String> {
        Ok(raw.to_owned())
    }

    fn display(value: &String) -> String {
        value.clone()
    }
}

pub(crate) struct NumberKind;

impl Kind for NumberKind {
    type Value = i64;
    const REQUIRED_LABEL: &'static str = "numeric";
    const CANDIDATE_LABEL: &'static str = "number";
    const DEFAULT_PREFIX: &'static str = "Using default env var";

    /// Base-10 integer whose canonical rendering is exactly the raw text, so
    /// `"05"`, `"+5"`, `" 5"`, `"-0"`, `"12.5"` and `"1e3"` are all rejected.
    fn parse(key: &str, raw: &str) -> Result<i64, String> {
        raw.parse::<i64>()
            .ok()
            .filter(|n| n.to_string() == raw)
            .ok_or_else(|| format!("Expected env var \"{key}\" to be numeric but was \"{raw}\"."))
    }

    fn display(value: &i64) -> String {
        value.to_string()
    }
}

pub(crate) struct BoolKind;

impl Kind for BoolKind {
    type Value = bool;
    const REQUIRED_LABEL: &'static str = "boolean";
    const CANDIDATE_LABEL: &'static str = "bool";
    const DEFAULT_PREFIX: &'static str = "Using default env var";

    fn parse(key: &str, raw: &str) -> Result<bool, String> {
        parse_bool(raw)
            .ok_or_else(|| format!("Expected env var \"{key}\" to be a bool but was \"{raw}\"."))
    }

    fn display(value: &bool) -> String {
        value.to_string()
    }
}

/// Case-insensitive `t`/`true`/`on`/`1` or `f`/`false`/`off`/`0`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "t" | "true" | "on" | "1" => Some(true),
        "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) struct PasswordKind;

impl Kind for PasswordKind {
    type Value = String;
    const REQUIRED_LABEL: &'static str = "password";
    const CANDIDATE_LABEL: &'static str = "password";

    fn parse(_key: &str, raw: &str) -> Result<String, String> {
        Ok(raw.to_owned())
    }

    fn display(value: &String) -> String {
        obfuscate(value)
    }

    fn display_raw(raw: &str) -> String {
        obfuscate(raw)
    }
}

pub(crate) struct CertificateKind;

impl Kind for CertificateKind {
    type Value = String;
    const REQUIRED_LABEL: &'static str = "certificate";
    const CANDIDATE_LABEL: &'static str = "certificate";

    fn parse(_key: &str, raw: &str) -> Result<String, String> {
        Ok(raw.to_owned())
    }

    fn display(value: &String) -> String {
        obfuscate_certificate(value)
    }

    fn display_raw(raw: &str) -> String {
        obfuscate_certificate(raw)
    }
}

pub(crate) struct UrlKind;

impl Kind for UrlKind {
    type Value = String;
    const REQUIRED_LABEL: &'static str = "url";
    const CANDIDATE_LABEL: &'static str = "url";
    const VALIDATES: bool = true;

    fn parse(_key: &str, raw: &str) -> Result<String, String> {
        Ok(raw.to_owned())
    }

    fn display(value: &String) -> String {
        obfuscate_auth(value)
    }

    fn display_raw(raw: &str) -> String {
        obfuscate_auth(raw)
    }
}
