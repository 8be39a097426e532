//! `obfuscate` command: print the masked form of a value.

use crate::obfuscate::{obfuscate, obfuscate_auth, obfuscate_certificate};
use clap::{Args, ValueEnum};

/// Which masking scheme to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SecretKind {
    /// Generic secret string
    #[default]
    Plain,
    /// URL with embedded credentials
    Url,
    /// PEM certificate
    Certificate,
}

/// Arguments for the obfuscate command.
#[derive(Args, Debug)]
pub struct ObfuscateArgs {
    /// Masking scheme
    #[arg(short, long, value_enum, default_value_t = SecretKind::Plain)]
    pub kind: SecretKind,

    /// Value to mask
    pub value: String,
}

/// Mask `args.value` according to its kind.
pub fn run_obfuscate(args: &ObfuscateArgs) -> String {
    match args.kind {
        SecretKind::Plain => obfuscate(&args.value),
        SecretKind::Url => obfuscate_auth(&args.value),
        SecretKind::Certificate => obfuscate_certificate(&args.value),
    }
}
