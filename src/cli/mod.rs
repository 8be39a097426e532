//! Command line surface of the `envread` binary.
//!
//! `check` resolves a list of typed variables and prints them with secrets
//! masked; `obfuscate` shows how a single value would appear in logs.

pub mod check;
pub mod obfuscate;

use crate::reader::Key;
use check::CheckArgs;
use clap::{Parser, Subcommand};
use obfuscate::ObfuscateArgs;
use std::fmt;
use std::str::FromStr;

/// Typed environment variable checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read variables from the environment and report what was resolved
    Check(CheckArgs),

    /// Print the masked form of a secret
    Obfuscate(ObfuscateArgs),
}

/// A variable requested on the command line.
///
/// Written as `KEY`, `KEY=default`, `FIRST,SECOND` or `FIRST,SECOND=default`.
/// A comma-separated list makes the keys fallback candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub key: Key,
    pub default: Option<String>,
}

impl VarSpec {
    /// Name used for the entry in the resolved configuration.
    pub fn name(&self) -> &str {
        match &self.key {
            Key::Single(key) => key,
            Key::Candidates(keys) => keys.first().map_or("", String::as_str),
        }
    }
}

impl FromStr for VarSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (keys, default) = match s.split_once('=') {
            Some((keys, default)) => (keys, Some(default.to_owned())),
            None => (s, None),
        };

        let keys: Vec<String> = keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_owned)
            .collect();

        let key = match keys.len() {
            0 => return Err(format!("no variable name in '{s}'")),
            1 => Key::Single(keys.into_iter().next().unwrap_or_default()),
            _ => Key::Candidates(keys),
        };
        Ok(Self { key, default })
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Key::Single(key) => write!(f, "{key}")?,
            Key::Candidates(keys) => write!(f, "{}", keys.join(","))?,
        }
        if let Some(default) = &self.default {
            write!(f, "={default}")?;
        }
        Ok(())
    }
}
