//! Building blocks of the installed subscriber.

use crate::error::{LoggerError, LoggerErrorExt};
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

pub(crate) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

const FILE_SUFFIX: &str = "log";

/// Default level plus optional `target=level` directives. Without directives, `RUST_LOG` is
/// honoured when set.
pub(crate) fn filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    match directives {
        None => Ok(builder.from_env_lossy()),
        Some(raw) => builder.parse(raw).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Bad filter directives '{raw}': {e}").into(),
            context: None,
        }),
    }
}

/// Compact human-readable lines on stderr; stdout stays free for command output.
pub(crate) fn console<S>() -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().compact().with_target(false).with_writer(std::io::stderr).boxed()
}

/// Daily rolling `<name>.<date>.log` files under `dir`, written off-thread.
pub(crate) fn file<S>(
    name: &str,
    dir: &Path,
    keep: usize,
    json: bool,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(dir).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Creating log directory {}", dir.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .filename_suffix(FILE_SUFFIX)
        .max_log_files(keep)
        .build(dir)
        .context(format!("Opening rolling log in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if json { layer.json().boxed() } else { layer.boxed() };
    Ok((layer, guard))
}
