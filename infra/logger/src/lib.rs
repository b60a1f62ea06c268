//! # Logger
//!
//! Process-wide `tracing` setup for the `ResBook` client and its tools.
//!
//! Console lines go to stderr so command output on stdout stays machine-readable. An optional
//! directory adds daily rolling files (plain or JSON), written by a background worker that the
//! returned [`Logger`] keeps alive.
//!
//! ## Example
//!
//! ```rust
//! # use resbook_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("resbook")
//!     .level(LevelFilter::DEBUG)
//!     .directives("reqwest=warn")
//!     .install()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod layers;

pub use crate::builder::{ConsoleOnly, LoggerBuilder, Named, ToDirectory, Unnamed};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;

/// Parses `trace`, `debug`, `info`, `warn`, `error` or `off`, ignoring case and surrounding
/// whitespace.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(raw.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{raw}': {e}").into(),
        context: None,
    })
}

/// Installed logging. Dropping it flushes and stops the file writer.
#[must_use = "Dropping the logger stops file output"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
    dir: Option<PathBuf>,
}

impl Logger {
    pub const fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Directory receiving log files, if file output is on.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_loosely() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(parse_level("loud").is_err());
    }
}
