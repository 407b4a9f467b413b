use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    Inputs, LeagueSettings, LogLevel, Logging, Output, Reconciliation, ReportSettings, Settings,
    TeamName,
};

/// Prefix for environment overrides, e.g. `GMOTY__REPORT__SEASON=2025`.
pub const ENV_PREFIX: &str = "GMOTY";

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gmoty";

/// Loads the report configuration.
///
/// An explicit `path` must exist. Without one, `gmoty.toml` in the working
/// directory is used if present. Environment variables prefixed with
/// `GMOTY__` are layered on top, and every missing section falls back to its
/// default before the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file_source = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}
