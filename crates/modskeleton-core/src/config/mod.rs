//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod mods;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::mods::{HookConfig, ModsConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Deserialization target for `config/default.toml`, the file given on the
/// command line, and `MODSKELETON__*` environment variables, merged in that
/// order. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Mod discovery settings.
    #[serde(default)]
    pub mods: ModsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Hooks declared by the host.
    #[serde(default)]
    pub hooks: Vec<HookConfig>,
}

impl AppConfig {
    /// Load configuration from the default file, `path`, and the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("MODSKELETON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Absolute-or-relative path of the directory scanned for archives.
    pub fn mods_path(&self) -> PathBuf {
        Path::new(&self.mods.root_dir).join(&self.mods.directory)
    }
}
