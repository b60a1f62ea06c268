use crate::error::{ClientError, ClientErrorExt};
use resbook_domain::config::LoggingConfig;
use resbook_logger::{Logger, parse_level};

/// Installs the global subscriber described by the `logging` section.
///
/// Keep the returned [`Logger`] alive until shutdown.
///
/// # Errors
/// Returns [`ClientError::Logger`] for an unknown level, an unusable log directory, or when a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, name: &str) -> Result<Logger, ClientError> {
    let level = parse_level(&config.level).context("Reading logging.level")?;
    let builder = Logger::builder().name(name).console(config.console).level(level);

    let logger = match &config.dir {
        Some(dir) => builder.directory(dir.clone()).json(config.json).install(),
        None => builder.install(),
    };
    logger.context("Installing log subscriber")
}
