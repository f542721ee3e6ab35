//! CLI command definitions and dispatch.

pub mod archives;
pub mod catalog;
pub mod config;
pub mod hooks;
pub mod plugins;
pub mod scan;

use clap::{Parser, Subcommand};

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;
use modskeleton_plugin::engine::{Engine, ScanReport};

use crate::output::OutputFormat;

/// ModSkeleton: mod archive discovery and hook dispatch
#[derive(Debug, Parser)]
#[command(name = "modskeleton", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mount archives, merge catalogs, and load plugins
    Scan,
    /// List discovered archives
    Archives,
    /// List files in the virtual filesystem
    Ls(archives::LsArgs),
    /// List catalog entries
    Catalog(catalog::CatalogArgs),
    /// List loaded plugins
    Plugins,
    /// List installed hooks
    Hooks,
    /// Invoke a hook and print the resulting payload
    Invoke(hooks::InvokeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Scan => scan::execute(&config, self.format),
            Commands::Archives => archives::execute_archives(&config, self.format),
            Commands::Ls(args) => archives::execute_ls(args, &config, self.format),
            Commands::Catalog(args) => catalog::execute(args, &config, self.format),
            Commands::Plugins => plugins::execute(&config, self.format),
            Commands::Hooks => hooks::execute_list(&config, self.format),
            Commands::Invoke(args) => hooks::execute_invoke(args, &config, self.format),
            Commands::Config(args) => config::execute(args, &self.config, &config, self.format),
        }
    }
}

/// Helper: build an engine and run a full scan of the configured mods directory
pub fn scan_engine(config: &AppConfig) -> Result<(Engine, ScanReport), AppError> {
    let mut engine = build_engine(config)?;
    let report = engine.scan_for_mod_plugins()?;
    Ok((engine, report))
}

/// Helper: build an engine with the configured class loader
#[cfg(feature = "dynamic")]
pub fn build_engine(config: &AppConfig) -> Result<Engine, AppError> {
    use modskeleton_plugin::loader::{ClassRegistry, DynamicClassLoader};

    let mut loader = DynamicClassLoader::new(ClassRegistry::new());
    let root = std::path::Path::new(&config.mods.root_dir);
    for library in &config.mods.libraries {
        // SAFETY: libraries are listed explicitly by the operator's configuration.
        unsafe { loader.load_library(&root.join(library)) }?;
    }
    Ok(Engine::from_app_config(config, loader))
}

/// Helper: build an engine with the configured class loader
#[cfg(not(feature = "dynamic"))]
pub fn build_engine(config: &AppConfig) -> Result<Engine, AppError> {
    use modskeleton_plugin::loader::ClassRegistry;
    use tracing::warn;

    if !config.mods.libraries.is_empty() {
        warn!(
            libraries = config.mods.libraries.len(),
            "Mod libraries configured but the `dynamic` feature is disabled; ignoring them"
        );
    }
    Ok(Engine::from_app_config(config, ClassRegistry::new()))
}
