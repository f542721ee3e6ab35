//! Configuration management CLI commands.

use std::collections::HashSet;

use clap::{Args, Subcommand};

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;
use modskeleton_plugin::hooks::BOOTSTRAP_HOOK;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => println!("{config:#?}"),
        },
        ConfigCommand::Validate => {
            if let Err(e) = validate(config) {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }

            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Mods directory", config.mods_path().display());
            output::print_kv("Archive extension", &config.mods.extension);
            output::print_kv("Plugin prefix", &config.mods.plugin_prefix);
            output::print_kv("Catalog index", &config.mods.catalog_index);
            output::print_kv("Libraries", config.mods.libraries.len());
            output::print_kv("Declared hooks", config.hooks.len());
            if !config.mods_path().is_dir() {
                output::print_warning("Mods directory does not exist yet");
            }
        }
    }

    Ok(())
}

/// Checks the values the engine cannot work without.
fn validate(config: &AppConfig) -> Result<(), AppError> {
    let mods = &config.mods;
    if mods.extension.trim_start_matches('.').is_empty() {
        return Err(AppError::validation("mods.extension must not be empty"));
    }
    if mods.plugin_prefix.is_empty() {
        return Err(AppError::validation("mods.plugin_prefix must not be empty"));
    }
    if mods.catalog_index.is_empty() {
        return Err(AppError::validation("mods.catalog_index must not be empty"));
    }

    let mut seen = HashSet::new();
    for hook in &config.hooks {
        if hook.name.is_empty() {
            return Err(AppError::validation("hooks[].name must not be empty"));
        }
        if hook.name == BOOTSTRAP_HOOK {
            return Err(AppError::validation(format!(
                "hook '{BOOTSTRAP_HOOK}' is reserved"
            )));
        }
        if !seen.insert(hook.name.as_str()) {
            return Err(AppError::validation(format!(
                "hook '{}' is declared more than once",
                hook.name
            )));
        }
    }

    Ok(())
}
