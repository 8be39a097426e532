//! Log and error sinks.
//!
//! Readers report through two callbacks, one for informational lines and one
//! for failures. Each call receives a single fully formatted line. The
//! built-in sinks forward to `tracing`; [`MemorySink`] collects lines so a
//! caller can inspect or replay them.

use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Callback receiving one formatted message line.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// Environment variable holding the subscriber filter directives.
pub const LOG_FILTER_ENV: &str = "ENVREAD_LOG";

/// Sink that logs at info level through `tracing`.
pub fn info_sink() -> Sink {
    Arc::new(|line: &str| tracing::info!(target: "envread", "{}", line))
}

/// Sink that logs at error level through `tracing`.
pub fn error_sink() -> Sink {
    Arc::new(|line: &str| tracing::error!(target: "envread", "{}", line))
}

/// Sink that drops everything.
pub(crate) fn null_sink() -> Sink {
    Arc::new(|_: &str| {})
}

/// Render keys as a quoted list literal, e.g. `[ 'FIRST', 'SECOND' ]`.
pub fn format_key_list<S: AsRef<str>>(keys: &[S]) -> String {
    if keys.is_empty() {
        return "[]".to_string();
    }
    let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k.as_ref())).collect();
    format!("[ {} ]", quoted.join(", "))
}

/// Thread-safe in-memory line collector.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Sink`] appending to this collector.
    pub fn sink(&self) -> Sink {
        let lines = Arc::clone(&self.lines);
        Arc::new(move |line: &str| {
            lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line.to_owned());
        })
    }

    /// Snapshot of collected lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Install a stderr `fmt` subscriber.
///
/// Filter directives come from `ENVREAD_LOG` when set, otherwise the level
/// implied by `verbose`.
pub fn init_subscriber(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
