//! Loaded plugin listing command.

use serde::Serialize;
use tabled::Tabled;

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Plugin display row
#[derive(Debug, Serialize, Tabled)]
struct PluginRow {
    /// Catalog identity
    identity: String,
    /// Class name
    class: String,
    /// Catalog type name
    type_name: String,
    /// Declared chained hooks
    hooks: String,
    /// Loaded at
    loaded_at: String,
}

/// Execute the plugins command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, _) = super::scan_engine(config)?;

    let rows: Vec<PluginRow> = engine
        .list_mod_plugins()
        .map(|plugin| PluginRow {
            identity: plugin.identity.clone(),
            class: plugin.class_name.clone(),
            type_name: plugin.type_name.clone(),
            hooks: plugin
                .instance
                .hook_connections()
                .iter()
                .map(|i| format!("{}@{}", i.hook, i.priority))
                .collect::<Vec<_>>()
                .join(", "),
            loaded_at: plugin.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
