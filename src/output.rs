//! Global output configuration and utilities.
//!
//! This module provides centralized control over CLI output behavior,
//! including quiet mode and diagnostic logging.
//!
//! ## Design Principles
//!
//! - Status messages, progress and logs go to stderr
//! - The metrics table goes to stdout
//! - Quiet mode suppresses non-essential output
//! - Diagnostics are `tracing` events, filtered by `RUST_LOG` or `-v`
//! - While a spinner is active, log lines are printed above it

use indicatif::ProgressBar;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Spinner currently drawing on stderr, if any.
static ACTIVE_PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Output configuration settings.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Number of `-v` flags given on the command line.
    pub verbosity: u8,
}

impl OutputConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub const fn default_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "artinya_cli=debug,warn",
            _ => "artinya_cli=trace,debug",
        }
    }
}

/// Initialize the global output configuration and the log subscriber.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(|| LogWriter::new(io::stderr()))
                .with_target(false),
        )
        .try_init();

    let _ = OUTPUT_CONFIG.set(config);
}

/// Marks `bar` as the progress bar that log output must go around.
pub fn register_progress(bar: &ProgressBar) {
    if let Ok(mut slot) = ACTIVE_PROGRESS.lock() {
        *slot = Some(bar.clone());
    }
}

/// Forgets the registered progress bar.
pub fn clear_progress() {
    if let Ok(mut slot) = ACTIVE_PROGRESS.lock() {
        *slot = None;
    }
}

fn active_progress() -> Option<ProgressBar> {
    ACTIVE_PROGRESS.lock().ok().and_then(|slot| slot.clone())
}

/// Returns `true` while log lines are being printed around a progress bar.
pub fn has_active_progress() -> bool {
    active_progress().is_some()
}

/// Log sink that hides the active spinner while a line is written, then
/// redraws it below.
pub struct LogWriter<W> {
    inner: W,
}

impl<W: Write> LogWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    fn around_progress<T>(
        &mut self,
        write: impl FnOnce(&mut W) -> io::Result<T>,
    ) -> io::Result<T> {
        match active_progress() {
            Some(bar) => bar.suspend(|| write(&mut self.inner)),
            None => write(&mut self.inner),
        }
    }
}

impl<W: Write> Write for LogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.around_progress(|inner| inner.write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.around_progress(|inner| inner.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for stage headings and other progress information.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}
