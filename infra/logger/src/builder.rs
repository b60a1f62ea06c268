use crate::error::LoggerError;
use crate::layers::{self, BoxedLayer};
use crate::Logger;
use private::Sealed;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_KEEP: usize = 7;

type Filtered = tracing_subscriber::layer::Layered<EnvFilter, Registry>;

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct ToDirectory(PathBuf);

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for ToDirectory {}

#[derive(Debug)]
struct Settings {
    level: LevelFilter,
    directives: Option<String>,
    console: bool,
    keep: usize,
    json: bool,
}

/// Typestate builder: a name is required before installing, and file knobs exist only once a
/// directory is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, D: Sealed = ConsoleOnly> {
    settings: Settings,
    name: N,
    dir: D,
}

impl LoggerBuilder {
    pub(crate) const fn new() -> Self {
        Self {
            settings: Settings {
                level: LevelFilter::INFO,
                directives: None,
                console: true,
                keep: DEFAULT_KEEP,
                json: false,
            },
            name: Unnamed,
            dir: ConsoleOnly,
        }
    }
}

impl<D: Sealed> LoggerBuilder<Unnamed, D> {
    /// Process name; prefixes the log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, D> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), dir: self.dir }
    }
}

impl<N: Sealed, D: Sealed> LoggerBuilder<N, D> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Per-target overrides such as `resbook_gateway=debug,reqwest=warn`.
    #[must_use]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }
}

impl<N: Sealed> LoggerBuilder<N, ConsoleOnly> {
    /// Also writes daily rolling files into `dir`.
    pub fn directory(self, dir: impl Into<PathBuf>) -> LoggerBuilder<N, ToDirectory> {
        LoggerBuilder { settings: self.settings, name: self.name, dir: ToDirectory(dir.into()) }
    }
}

impl<N: Sealed> LoggerBuilder<N, ToDirectory> {
    /// Number of daily files kept.
    #[must_use]
    pub const fn keep(mut self, files: usize) -> Self {
        self.settings.keep = files;
        self
    }

    /// JSON lines instead of plain text in the files.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

impl LoggerBuilder<Named, ConsoleOnly> {
    /// Installs the global subscriber.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] when nothing would be written or the directives do
    /// not parse, [`LoggerError::Subscriber`] when a subscriber is already installed.
    pub fn install(self) -> Result<Logger, LoggerError> {
        let Self { settings, name, .. } = self;
        install(&settings, &name.0, None)
    }
}

impl LoggerBuilder<Named, ToDirectory> {
    /// Installs the global subscriber with the file sink.
    ///
    /// # Errors
    /// As for the console-only variant, plus [`LoggerError::Appender`] or
    /// [`LoggerError::Internal`] when the directory is unusable.
    pub fn install(self) -> Result<Logger, LoggerError> {
        let Self { settings, name, dir } = self;
        install(&settings, &name.0, Some(dir.0))
    }
}

fn install(settings: &Settings, name: &str, dir: Option<PathBuf>) -> Result<Logger, LoggerError> {
    check(settings, name, dir.is_some())?;
    let filter = layers::filter(settings.level, settings.directives.as_deref())?;

    let mut sinks: Vec<BoxedLayer<Filtered>> = Vec::new();
    if settings.console {
        sinks.push(layers::console());
    }
    let guard = match &dir {
        Some(dir) => {
            let (layer, guard) = layers::file(name, dir, settings.keep, settings.json)?;
            sinks.push(layer);
            Some(guard)
        },
        None => None,
    };

    tracing_subscriber::registry().with(filter).with(sinks).try_init()?;
    Ok(Logger { guard, dir })
}

fn check(settings: &Settings, name: &str, has_dir: bool) -> Result<(), LoggerError> {
    let problem = if name.trim().is_empty() {
        Some("name must not be blank")
    } else if !settings.console && !has_dir {
        Some("console is off and no directory is set, nothing would be written")
    } else if has_dir && settings.keep == 0 {
        Some("at least one log file must be kept")
    } else {
        None
    };

    problem.map_or(Ok(()), |message| {
        Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
    })
}
