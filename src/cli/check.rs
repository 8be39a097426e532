//! `check` command: read requested variables and report the result.

use super::VarSpec;
use crate::logging::{MemorySink, Sink, error_sink};
use crate::obfuscate::{obfuscate, obfuscate_auth, obfuscate_certificate};
use crate::object::{Object, make_clonable_and_deep_freeze};
use crate::options::ReadOptions;
use crate::reader::{Reader, parse_bool};
use crate::validator::Validator;
use anyhow::{Context, Result, bail};
use clap::Args;
use std::sync::Arc;

/// Arguments for the check command.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// String variable (KEY, KEY=default, or A,B for fallbacks)
    #[arg(long, value_name = "SPEC")]
    pub string: Vec<VarSpec>,

    /// Integer variable
    #[arg(long, value_name = "SPEC")]
    pub number: Vec<VarSpec>,

    /// Boolean variable (t/true/on/1 or f/false/off/0)
    #[arg(long = "bool", value_name = "SPEC")]
    pub boolean: Vec<VarSpec>,

    /// Password variable, masked in all output
    #[arg(long, value_name = "SPEC")]
    pub password: Vec<VarSpec>,

    /// PEM certificate variable, masked in all output
    #[arg(long, value_name = "SPEC")]
    pub certificate: Vec<VarSpec>,

    /// URL variable, embedded passwords masked in all output
    #[arg(long, value_name = "SPEC")]
    pub url: Vec<VarSpec>,

    /// Regex every string and URL value must match
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<String>,
}

/// Result of a check run.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Resolved values keyed by variable name, secrets masked. Frozen.
    pub config: Object,
    /// Error lines reported while reading.
    pub errors: Vec<String>,
    /// Whether any required variable was missing or invalid.
    pub missing: bool,
}

/// Read every requested variable through `reader`.
///
/// Log and error lines still reach the reader's configured sinks (the
/// `tracing` ones by default); error lines are also collected into the
/// outcome.
pub fn run_check(args: &CheckArgs, reader: &Reader) -> Result<CheckOutcome> {
    let validator = args
        .pattern
        .as_deref()
        .map(Validator::new)
        .transpose()
        .context("invalid --pattern")?;

    let errors = MemorySink::new();
    let error_out = tee(
        reader.default_options().error.clone().unwrap_or_else(error_sink),
        errors.sink(),
    );

    let config = Object::new();

    for spec in &args.string {
        let mut opts = call_options(&error_out, spec.default.clone());
        opts.validator = validator.clone();
        config.set(spec.name(), reader.read_string_with(spec.key.clone(), opts));
    }

    for spec in &args.number {
        let default = match &spec.default {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .with_context(|| format!("default for {spec} is not an integer"))?,
            ),
            None => None,
        };
        let opts = call_options(&error_out, default);
        config.set(spec.name(), reader.read_number_with(spec.key.clone(), opts));
    }

    for spec in &args.boolean {
        let default = match &spec.default {
            Some(raw) => match parse_bool(raw) {
                Some(b) => Some(b),
                None => bail!("default for {spec} is not a boolean"),
            },
            None => None,
        };
        let opts = call_options(&error_out, default);
        config.set(spec.name(), reader.read_bool_with(spec.key.clone(), opts));
    }

    for spec in &args.password {
        let opts = call_options(&error_out, spec.default.clone());
        let value = reader.read_password_with(spec.key.clone(), opts);
        config.set(spec.name(), value.as_deref().map(obfuscate));
    }

    for spec in &args.certificate {
        let opts = call_options(&error_out, spec.default.clone());
        let value = reader.read_certificate_with(spec.key.clone(), opts);
        config.set(spec.name(), value.as_deref().map(obfuscate_certificate));
    }

    for spec in &args.url {
        let mut opts = call_options(&error_out, spec.default.clone());
        opts.validator = validator.clone();
        let value = reader.read_url_with(spec.key.clone(), opts);
        config.set(spec.name(), value.as_deref().map(obfuscate_auth));
    }

    make_clonable_and_deep_freeze(&config);

    Ok(CheckOutcome {
        config,
        errors: errors.lines(),
        missing: reader.missing_env_vars(),
    })
}

/// Render the outcome as pretty JSON.
pub fn render(outcome: &CheckOutcome) -> Result<String> {
    let json = outcome.config.to_json()?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Per-call options: collected error sink plus the spec's default. The log
/// sink is left to the reader's defaults.
fn call_options<T>(error: &Sink, default: Option<T>) -> ReadOptions<T> {
    ReadOptions {
        error: Some(Arc::clone(error)),
        default_value: default,
        ..ReadOptions::default()
    }
}

fn tee(first: Sink, second: Sink) -> Sink {
    Arc::new(move |line: &str| {
        first(line);
        second(line);
    })
}
