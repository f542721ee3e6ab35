//! Scan command: mount, merge, and resolve, then summarize.

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;
use modskeleton_plugin::catalog::MergeOutcome;

use crate::output::{self, OutputFormat};

/// Execute the scan command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, report) = super::scan_engine(config)?;

    if format == OutputFormat::Json {
        output::print_json(&report);
        return Ok(());
    }

    let mounts = &report.discovery.mounts;
    output::print_success(&format!(
        "Scanned '{}'",
        engine.config().mods_dir.display()
    ));
    output::print_kv("Archives mounted", mounts.mounted.len());
    output::print_kv("Archives failed", mounts.failed.len());
    output::print_kv("Catalog entries", engine.catalog().len());
    output::print_kv("Plugins loaded", report.resolve.loaded.len());
    output::print_kv("Unresolved candidates", report.resolve.unresolved.len());
    output::print_kv("Rejected candidates", report.resolve.rejected.len());
    output::print_kv("Hook connections", engine.connections().len());

    for failure in &mounts.failed {
        output::print_warning(&format!("{}: {}", failure.path.display(), failure.reason));
    }
    for merge in &report.discovery.merges {
        if let MergeOutcome::Rejected { reason } = &merge.outcome {
            output::print_warning(&format!("{}: {}", merge.path.display(), reason));
        }
    }
    for failure in &report.resolve.failed {
        output::print_warning(&format!("{}: {}", failure.identity, failure.reason));
    }

    Ok(())
}
