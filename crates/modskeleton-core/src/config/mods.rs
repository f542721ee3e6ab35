//! Mod discovery configuration.

use serde::{Deserialize, Serialize};

/// Where mod archives are discovered and how their contents are interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModsConfig {
    /// Application root the mods directory is resolved against.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    /// Subdirectory of `root_dir` scanned for archives.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Archive file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Catalog entry name prefix marking plugin candidates (case-sensitive).
    #[serde(default = "default_plugin_prefix")]
    pub plugin_prefix: String,
    /// File name of the catalog index at the root of each mount point.
    #[serde(default = "default_catalog_index")]
    pub catalog_index: String,
    /// Shared libraries providing plugin classes (requires the `dynamic` feature).
    #[serde(default)]
    pub libraries: Vec<String>,
}

impl Default for ModsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            directory: default_directory(),
            extension: default_extension(),
            plugin_prefix: default_plugin_prefix(),
            catalog_index: default_catalog_index(),
            libraries: Vec::new(),
        }
    }
}

/// A hook the host declares up front, in addition to the bootstrap hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Unique hook name.
    pub name: String,
    /// Broadcast to every loaded plugin instead of only connected ones.
    #[serde(default)]
    pub always_invoke: bool,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

fn default_root_dir() -> String {
    ".".to_string()
}

fn default_directory() -> String {
    "Mods".to_string()
}

fn default_extension() -> String {
    "pak".to_string()
}

fn default_plugin_prefix() -> String {
    "MOD_SKELETON".to_string()
}

fn default_catalog_index() -> String {
    "AssetRegistry.bin".to_string()
}
