//! Archive and virtual filesystem listing commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Virtual path prefix to list
    #[arg(default_value = "/")]
    pub prefix: String,

    /// Treat the prefix as a package path (`/<ArchiveName>/...`)
    #[arg(short, long)]
    pub package: bool,
}

/// Archive display row
#[derive(Debug, Serialize, Tabled)]
struct ArchiveRow {
    /// Archive path
    path: String,
    /// Mount point
    mount_point: String,
    /// Mounted
    mounted: bool,
    /// Package root
    package_root: String,
    /// Mounted at
    mounted_at: String,
}

/// Virtual file display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Virtual path
    path: String,
}

/// Execute the archives command
pub fn execute_archives(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, _) = super::scan_engine(config)?;

    let rows: Vec<ArchiveRow> = engine
        .mounts()
        .records()
        .map(|record| ArchiveRow {
            path: record.path.display().to_string(),
            mount_point: record.mount_point.clone().unwrap_or_else(|| "-".to_string()),
            mounted: record.mounted,
            package_root: record.package_root.clone().unwrap_or_else(|| "-".to_string()),
            mounted_at: record
                .mounted_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Execute the ls command
pub fn execute_ls(args: &LsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, _) = super::scan_engine(config)?;
    let mounts = engine.mounts();

    let prefix = if args.package {
        let namespace = mounts.namespace();
        namespace.resolve(&args.prefix).ok_or_else(|| {
            let known: Vec<&str> = namespace.roots().map(|(root, _)| root).collect();
            AppError::not_found(format!(
                "No package root matches '{}' (known roots: {})",
                args.prefix,
                known.join(", ")
            ))
        })?
    } else {
        args.prefix.clone()
    };

    let rows: Vec<FileRow> = mounts
        .vfs()
        .list(&prefix)
        .into_iter()
        .map(|path| FileRow { path })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
