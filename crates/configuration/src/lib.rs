use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::{build_subscriber, init_logging};
pub use settings::{
    Config, CurrencySettings, DatasetSettings, LoggingSettings, OutputFormat, ReportSettings,
};

/// The file read when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Prefix for environment overrides, e.g. `SHOPSCOPE__REPORT__TOP_N=5`.
pub const ENV_PREFIX: &str = "SHOPSCOPE";

/// Loads and validates the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file, then
/// `SHOPSCOPE__*` environment variables. An explicit `path` must exist; the
/// default `dashboard.toml` is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
