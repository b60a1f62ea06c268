use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `RESBOOK__API__BASE_URL`.
pub const ENV_PREFIX: &str = "RESBOOK";
/// Config file looked up (without extension) when no explicit path is given.
pub const DEFAULT_FILE: &str = "resbook";

/// Custom error type for config loading.
#[resbook_derive::resbook_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from `path` (required), or from an optional `resbook.*` file
///    in the working directory when no path is given.
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with
///    `RESBOOK__`. Nested structures are accessed using double underscores (e.g.
///    `RESBOOK__API__TIMEOUT_MS` maps to `api.timeout_ms`).
///
/// Sections missing from both layers fall back to the `Default` of `T`'s fields, so `T` should
/// use `#[serde(default)]`.
///
/// # Errors
/// This function will return an error if:
/// * An explicitly given configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path, None)
}

/// Same as [`load_config`], but reads overrides from `vars` instead of the process environment.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with_env<T, I>(path: Option<impl AsRef<Path>>, vars: I) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, String)>,
{
    layered(path, Some(vars.into_iter().collect()))
}

fn layered<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<config::Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path.as_ref() {
        Some(p) => {
            info!(path = %p.as_ref().display(), "Loading config");
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .source(vars),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
