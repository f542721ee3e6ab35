//! Plugin resolver: turns prefixed catalog entries into loaded plugins.
//!
//! Each catalog entry whose name starts with the plugin prefix is resolved
//! through the class loader, instantiated, checked for the plugin
//! capability, bootstrapped, and registered under its object identity. An
//! identity is loaded at most once; later passes skip it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::catalog::Catalog;
use crate::error::ModError;
use crate::hooks::definitions::{BOOTSTRAP_HOOK, HookIo};
use crate::loader::ClassLoader;
use crate::traits::ModPlugin;

/// A plugin that passed resolution.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    /// Catalog object identity.
    pub identity: String,
    /// Catalog type name it was resolved from.
    pub type_name: String,
    /// Instance class name.
    pub class_name: String,
    /// The instance.
    pub instance: Arc<dyn ModPlugin>,
    /// When it was registered.
    pub loaded_at: DateTime<Utc>,
}

/// A candidate that resolved but could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveFailure {
    /// Catalog object identity.
    pub identity: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveReport {
    /// Identities loaded by this pass, in registration order.
    pub loaded: Vec<String>,
    /// Candidates skipped because they were loaded on an earlier pass.
    pub already_loaded: usize,
    /// Candidates whose type name did not resolve.
    pub unresolved: Vec<String>,
    /// Candidates whose instance was not a plugin.
    pub rejected: Vec<String>,
    /// Candidates whose factory failed.
    pub failed: Vec<ResolveFailure>,
}

/// Identity-keyed map of loaded plugins, in registration order.
#[derive(Debug, Default)]
pub struct PluginResolver {
    prefix: String,
    plugins: IndexMap<String, LoadedPlugin>,
}

impl PluginResolver {
    /// Creates a resolver for catalog names starting with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            plugins: IndexMap::new(),
        }
    }

    /// Resolves every prefixed, not-yet-loaded catalog entry.
    pub fn resolve(&mut self, catalog: &Catalog, loader: &dyn ClassLoader) -> ResolveReport {
        let mut report = ResolveReport::default();
        let prefix = self.prefix.clone();

        for entry in catalog.with_name_prefix(&prefix) {
            let identity = &entry.object_identity;
            if self.plugins.contains_key(identity) {
                report.already_loaded += 1;
                continue;
            }

            let Some(class) = loader.resolve_type(&entry.type_name) else {
                let err = ModError::TypeResolution {
                    type_name: entry.type_name.clone(),
                };
                trace!(identity = %identity, error = %err, "Skipping catalog entry");
                report.unresolved.push(identity.clone());
                continue;
            };

            let object = match loader.instantiate(&class) {
                Ok(object) => object,
                Err(e) => {
                    error!(identity = %identity, class = %class.name(), error = %e, "Failed to instantiate mod class");
                    report.failed.push(ResolveFailure {
                        identity: identity.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let class_name = object.class_name().to_string();
            let Some(plugin) = object.as_plugin() else {
                let err = ModError::CapabilityMismatch { class_name };
                debug!(identity = %identity, error = %err, "Discarding instance");
                report.rejected.push(identity.clone());
                continue;
            };

            if let Err(e) = plugin.invoke_hook(BOOTSTRAP_HOOK, HookIo::new()) {
                warn!(
                    identity = %identity,
                    hook = BOOTSTRAP_HOOK,
                    error = %e,
                    "Bootstrap hook failed"
                );
            }

            info!(identity = %identity, class = %class_name, "Mod plugin loaded");

            self.plugins.insert(
                identity.clone(),
                LoadedPlugin {
                    identity: identity.clone(),
                    type_name: entry.type_name.clone(),
                    class_name,
                    instance: plugin,
                    loaded_at: Utc::now(),
                },
            );
            report.loaded.push(identity.clone());
        }

        report
    }

    /// Loaded plugin by identity.
    pub fn get(&self, identity: &str) -> Option<&LoadedPlugin> {
        self.plugins.get(identity)
    }

    /// Loaded plugins in registration order.
    pub fn plugins(&self) -> impl Iterator<Item = &LoadedPlugin> {
        self.plugins.values()
    }

    /// Number of loaded plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
