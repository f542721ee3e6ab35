//! Catalog listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the catalog command
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Only entries whose name starts with this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Only plugin candidates (entries matching the configured plugin prefix)
    #[arg(long, conflicts_with = "prefix")]
    pub candidates: bool,
}

/// Catalog entry display row
#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    /// Entry name
    name: String,
    /// Package path
    package_path: String,
    /// Object identity
    object_identity: String,
    /// Type name
    type_name: String,
}

/// Execute the catalog command
pub fn execute(args: &CatalogArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, _) = super::scan_engine(config)?;

    let prefix = if args.candidates {
        config.mods.plugin_prefix.as_str()
    } else {
        args.prefix.as_deref().unwrap_or_default()
    };

    let rows: Vec<CatalogRow> = engine
        .catalog()
        .with_name_prefix(prefix)
        .map(|entry| CatalogRow {
            name: entry.name.clone(),
            package_path: entry.package_path.clone(),
            object_identity: entry.object_identity.clone(),
            type_name: entry.type_name.clone(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
