use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use localfit_core::HardwareProfile;
use serde::Deserialize;

/// CLI defaults, layered: built-in defaults, then an optional config file,
/// then `LOCALFIT_` environment variables.
///
/// Nested keys use double underscores:
/// - `LOCALFIT_HARDWARE__RAM_GB=32` -> hardware.ram_gb
/// - `LOCALFIT_HARDWARE__GPU_VENDOR="Apple Silicon"` -> hardware.gpu_vendor
/// - `LOCALFIT_OUTPUT__JSON=true` -> output.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Hardware used when no flags or profile file are given
    #[serde(default)]
    pub hardware: HardwareProfile,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Print JSON instead of tables
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Load configuration. The file format is picked from its extension.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder.add_source(environment()).build()?;

        config.try_deserialize()
    }
}

/// `LOCALFIT_*` variables, `__` separating nested keys.
fn environment() -> Environment {
    Environment::with_prefix("LOCALFIT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
