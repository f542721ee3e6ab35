//! Hook listing and invocation commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use modskeleton_core::config::AppConfig;
use modskeleton_core::error::AppError;
use modskeleton_plugin::hooks::HookIo;

use crate::output::{self, OutputFormat};

/// Arguments for the invoke command
#[derive(Debug, Args)]
pub struct InvokeArgs {
    /// Hook name
    pub hook: String,

    /// Input payload as a JSON array
    #[arg(short, long, default_value = "[]")]
    pub input: String,
}

/// Hook display row
#[derive(Debug, Serialize, Tabled)]
struct HookRow {
    /// Hook name
    name: String,
    /// Invocation policy
    policy: String,
    /// Connected plugins
    connections: usize,
    /// Description
    description: String,
}

/// Execute the hooks command
pub fn execute_list(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (engine, _) = super::scan_engine(config)?;

    let rows: Vec<HookRow> = engine
        .list_hooks()
        .into_iter()
        .map(|hook| HookRow {
            connections: engine.connections().for_hook(&hook.name).len(),
            policy: hook.policy().to_string(),
            name: hook.name,
            description: hook.description,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Execute the invoke command
pub fn execute_invoke(
    args: &InvokeArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let input: HookIo = serde_json::from_str(&args.input).map_err(|e| {
        AppError::validation(format!("Hook input must be a JSON array: {e}"))
    })?;

    let (engine, _) = super::scan_engine(config)?;
    let result = engine.dispatch_hook(&args.hook, input);

    if format == OutputFormat::Json {
        output::print_json(&result);
        return Ok(());
    }

    if !result.registered {
        output::print_warning(&format!(
            "Hook '{}' is not registered; input passed through",
            result.hook
        ));
    }
    output::print_kv("Hook", &result.hook);
    output::print_kv("Stages invoked", result.invoked);
    output::print_kv("Stages failed", result.failures.len());
    for failure in &result.failures {
        output::print_warning(&format!("{}: {}", failure.plugin, failure.reason));
    }
    output::print_json(&result.output);

    Ok(())
}
