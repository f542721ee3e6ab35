//! The engine: owns every piece of mod state and sequences the pipeline.
//!
//! Discovery mounts archives and merges each new archive's catalog index as
//! soon as it is mounted. Resolution turns prefixed catalog entries into
//! plugins and connects the hooks they declare. Dispatch runs hooks against
//! the loaded plugins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modskeleton_core::config::AppConfig;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::archive::{MountManager, MountReport, VirtualFs};
use crate::catalog::{Catalog, CatalogFormat, JsonCatalogFormat, MergeOutcome};
use crate::error::ModResult;
use crate::hooks::{
    ConnectionQueue, DispatchResult, HookDescription, HookDispatcher, HookIo, HookRegistry,
};
use crate::loader::ClassLoader;
use crate::resolver::{LoadedPlugin, PluginResolver, ResolveReport};
use crate::traits::ModObject;

/// Where to look for mods and how to recognize plugins.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory scanned for archives.
    pub mods_dir: PathBuf,
    /// Archive extension, without the dot.
    pub extension: String,
    /// Catalog name prefix of plugin candidates.
    pub plugin_prefix: String,
    /// Catalog index file name under each mount point.
    pub catalog_index: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ScanConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            mods_dir: config.mods_path(),
            extension: config.mods.extension.clone(),
            plugin_prefix: config.mods.plugin_prefix.clone(),
            catalog_index: config.mods.catalog_index.clone(),
        }
    }
}

/// Catalog merge result for one newly mounted archive.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogMerge {
    /// Archive path.
    pub path: PathBuf,
    /// Mount point the index was read from.
    pub mount_point: String,
    /// What happened.
    pub outcome: MergeOutcome,
}

/// Outcome of mounting a directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    /// Mount results.
    pub mounts: MountReport,
    /// One merge per newly mounted archive, in mount order.
    pub merges: Vec<CatalogMerge>,
}

/// Outcome of a full scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Discovery and catalog merge.
    pub discovery: DiscoveryReport,
    /// Plugin resolution.
    pub resolve: ResolveReport,
}

/// Mod discovery and hook dispatch engine.
#[derive(Debug)]
pub struct Engine {
    config: ScanConfig,
    // Fields drop in declaration order. Anything holding plugin instances
    // must come before `class_loader`.
    hooks: HookRegistry,
    connections: ConnectionQueue,
    plugins: PluginResolver,
    catalog: Catalog,
    mounts: MountManager,
    catalog_format: Box<dyn CatalogFormat>,
    class_loader: Box<dyn ClassLoader>,
}

impl Engine {
    /// Creates an engine with the bootstrap hook installed.
    pub fn new(config: ScanConfig, class_loader: impl ClassLoader + 'static) -> Self {
        let mut engine = Self {
            hooks: HookRegistry::new(),
            connections: ConnectionQueue::new(),
            plugins: PluginResolver::new(config.plugin_prefix.clone()),
            catalog: Catalog::new(),
            mounts: MountManager::new(config.extension.clone()),
            catalog_format: Box::new(JsonCatalogFormat),
            class_loader: Box::new(class_loader),
            config,
        };
        engine.install_hook(HookDescription::bootstrap());
        engine
    }

    /// Creates an engine from application configuration, installing the
    /// configured hooks after the bootstrap hook.
    pub fn from_app_config(config: &AppConfig, class_loader: impl ClassLoader + 'static) -> Self {
        let mut engine = Self::new(ScanConfig::from(config), class_loader);
        for hook in &config.hooks {
            engine.install_hook(hook.clone().into());
        }
        engine
    }

    /// Replaces the catalog index decoder.
    pub fn with_catalog_format(mut self, format: impl CatalogFormat + 'static) -> Self {
        self.catalog_format = Box::new(format);
        self
    }

    /// Mounts the configured mods directory, then resolves plugins.
    pub fn scan_for_mod_plugins(&mut self) -> ModResult<ScanReport> {
        let mods_dir = self.config.mods_dir.clone();
        info!(directory = %mods_dir.display(), "Scanning for mod plugins");

        let discovery = self.discover_and_mount(&mods_dir)?;
        let resolve = self.resolve_plugins();

        info!(
            mounted = discovery.mounts.mounted.len(),
            catalog_entries = self.catalog.len(),
            plugins = self.plugins.len(),
            "Mod scan complete"
        );

        Ok(ScanReport { discovery, resolve })
    }

    /// Mounts every new archive in `directory`, merging each archive's
    /// catalog as soon as it is attached.
    pub fn discover_and_mount(&mut self, directory: &Path) -> ModResult<DiscoveryReport> {
        let catalog = &mut self.catalog;
        let format = self.catalog_format.as_ref();
        let index_file = self.config.catalog_index.as_str();

        let mut merges = Vec::new();
        let mounts = self
            .mounts
            .discover_and_mount_with(directory, |vfs, record| {
                let Some(mount_point) = record.mount_point.as_deref() else {
                    return;
                };
                merges.push(CatalogMerge {
                    path: record.path.clone(),
                    mount_point: mount_point.to_string(),
                    outcome: merge_index(catalog, vfs, format, index_file, mount_point),
                });
            })?;

        Ok(DiscoveryReport { mounts, merges })
    }

    /// Merges the catalog index under `mount_point`, if there is one.
    /// A malformed index is logged and reported, never fatal.
    pub fn merge_catalog(&mut self, mount_point: &str) -> MergeOutcome {
        merge_index(
            &mut self.catalog,
            self.mounts.vfs(),
            self.catalog_format.as_ref(),
            &self.config.catalog_index,
            mount_point,
        )
    }

    /// Resolves plugins from the catalog and connects the hooks each newly
    /// loaded plugin declares.
    pub fn resolve_plugins(&mut self) -> ResolveReport {
        let report = self
            .plugins
            .resolve(&self.catalog, self.class_loader.as_ref());

        for identity in &report.loaded {
            let Some(loaded) = self.plugins.get(identity) else {
                continue;
            };
            for interest in loaded.instance.hook_connections() {
                self.connections.connect_plugin(
                    interest.hook,
                    interest.priority,
                    loaded.instance.clone(),
                );
            }
        }

        report
    }

    /// Loaded plugins in registration order.
    pub fn list_mod_plugins(&self) -> impl Iterator<Item = &LoadedPlugin> {
        self.plugins.plugins()
    }

    /// Installs a hook. Returns `false`, changing nothing, if the name is taken.
    pub fn install_hook(&mut self, description: HookDescription) -> bool {
        match self.hooks.register(description) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Hook installation rejected");
                false
            }
        }
    }

    /// Every installed hook, sorted by name.
    pub fn list_hooks(&self) -> Vec<HookDescription> {
        self.hooks.list()
    }

    /// Description of `name`, if installed.
    pub fn get_hook_description(&self, name: &str) -> Option<&HookDescription> {
        self.hooks.get(name)
    }

    /// Connects `object` to a chained hook. Fails with `CapabilityMismatch`
    /// if `object` is not a plugin.
    pub fn connect_hook(
        &mut self,
        hook_name: &str,
        priority: i32,
        object: Arc<dyn ModObject>,
    ) -> ModResult<()> {
        self.connections.connect(hook_name, priority, object)
    }

    /// Runs a hook and returns the final payload.
    pub fn invoke_hook(&self, hook_name: &str, io: HookIo) -> HookIo {
        self.dispatcher().invoke(hook_name, io)
    }

    /// Runs a hook and returns the full dispatch outcome.
    pub fn dispatch_hook(&self, hook_name: &str, io: HookIo) -> DispatchResult {
        self.dispatcher().dispatch(hook_name, io)
    }

    /// Dispatcher borrowing this engine's state.
    pub fn dispatcher(&self) -> HookDispatcher<'_> {
        HookDispatcher::new(&self.hooks, &self.plugins, &self.connections)
    }

    /// Scan settings.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mounted archives, VFS, and namespace.
    pub fn mounts(&self) -> &MountManager {
        &self.mounts
    }

    /// Hook connections.
    pub fn connections(&self) -> &ConnectionQueue {
        &self.connections
    }
}

fn merge_index(
    catalog: &mut Catalog,
    vfs: &VirtualFs,
    format: &dyn CatalogFormat,
    index_file: &str,
    mount_point: &str,
) -> MergeOutcome {
    catalog
        .merge_from(vfs, mount_point, format, index_file)
        .unwrap_or_else(|e| {
            error!(mount_point = %mount_point, error = %e, "Failed to merge catalog index");
            MergeOutcome::Rejected {
                reason: e.to_string(),
            }
        })
}
