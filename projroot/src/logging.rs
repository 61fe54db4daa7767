//! Logging infrastructure for the projroot library.
//!
//! The library itself only talks to the [`log`] facade. This module provides
//! the stderr backend used by the CLI, with three coarse verbosity levels.

use std::env;
use std::fmt;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable consulted by [`init_logger`] when no CLI flag is set.
pub const LOG_MODE_ENV: &str = "PROJROOT_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use projroot::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all output, including errors.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use projroot::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter this level corresponds to.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr-based `log` backend.
///
/// The logger respects the configured level and only outputs records at or
/// above it.
///
/// # Examples
///
/// ```
/// use projroot::{Logger, LogLevel};
/// use log::Log;
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert!(logger.enabled(&log::Metadata::builder().level(log::Level::Error).build()));
/// assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Debug).build()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Resolves the log level from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet, verbose wins if both are set)
/// 2. `PROJROOT_LOG_MODE` environment variable
/// 3. Default (Normal)
#[must_use]
pub fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or(LogLevel::Normal)
}

/// Initializes the global logger based on environment variables and CLI flags.
///
/// See [`resolve_level`] for the precedence rules. Installing a logger twice
/// keeps the first backend but still updates the maximum level.
///
/// # Examples
///
/// ```
/// use projroot::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let logger = Logger::new(resolve_level(verbose, quiet));

    // A second installation attempt is harmless.
    let _ = log::set_boxed_logger(Box::new(logger));
    log::set_max_level(logger.level().filter());

    logger
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_log_mode<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let saved = env::var(LOG_MODE_ENV).ok();
        match value {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
        let out = f();
        match saved {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
        out
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Quiet), "quiet");
        assert_eq!(format!("{}", LogLevel::Normal), "normal");
        assert_eq!(format!("{}", LogLevel::Verbose), "verbose");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(LogLevel::Quiet.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_quiet_logger_drops_errors() {
        let logger = Logger::new(LogLevel::Quiet);
        let meta = Metadata::builder().level(log::Level::Error).build();
        assert!(!logger.enabled(&meta));
    }

    #[test]
    fn test_logger_default() {
        assert_eq!(Logger::default().level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_resolve_level_defaults() {
        let level = with_log_mode(None, || resolve_level(false, false));
        assert_eq!(level, LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_resolve_level_flags_override_env() {
        let level = with_log_mode(Some("quiet"), || resolve_level(true, false));
        assert_eq!(level, LogLevel::Verbose);

        let level = with_log_mode(Some("verbose"), || resolve_level(false, true));
        assert_eq!(level, LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_resolve_level_from_env() {
        let level = with_log_mode(Some("verbose"), || resolve_level(false, false));
        assert_eq!(level, LogLevel::Verbose);

        let level = with_log_mode(Some("invalid"), || resolve_level(false, false));
        assert_eq!(level, LogLevel::Normal);
    }
}
