//! Engine-wide catalog of content and type entries merged from mounted archives.

pub mod format;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::archive::VirtualFs;
use crate::error::{ModError, ModResult};

pub use format::{CatalogFormat, JsonCatalogFormat};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Asset name, matched against the plugin prefix.
    pub name: String,
    /// Package the asset lives in.
    pub package_path: String,
    /// Unique identity; the catalog key.
    pub object_identity: String,
    /// Type name handed to the class loader.
    pub type_name: String,
}

impl CatalogEntry {
    /// Creates an entry.
    pub fn new(
        name: impl Into<String>,
        package_path: impl Into<String>,
        object_identity: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_path: package_path.into(),
            object_identity: object_identity.into(),
            type_name: type_name.into(),
        }
    }
}

/// Result of merging one archive's index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MergeOutcome {
    /// The archive carries no catalog index.
    NoIndex,
    /// The index was merged.
    Merged {
        /// New identities.
        added: usize,
        /// Identities overwritten by this archive.
        replaced: usize,
    },
    /// The index was present but could not be decoded.
    Rejected {
        /// Decoder message.
        reason: String,
    },
}

/// Identity-keyed catalog. Iteration order is first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges entries; a colliding identity takes the newer value but keeps
    /// its original position. Returns `(added, replaced)`.
    pub fn merge(&mut self, entries: impl IntoIterator<Item = CatalogEntry>) -> (usize, usize) {
        let mut added = 0;
        let mut replaced = 0;
        for entry in entries {
            let identity = entry.object_identity.clone();
            match self.entries.insert(identity, entry) {
                Some(previous) => {
                    debug!(
                        identity = %previous.object_identity,
                        previous_type = %previous.type_name,
                        "Catalog entry replaced by later archive"
                    );
                    replaced += 1;
                }
                None => added += 1,
            }
        }
        (added, replaced)
    }

    /// Loads `<mount_point><index_file>` from the VFS and merges it.
    pub fn merge_from(
        &mut self,
        vfs: &VirtualFs,
        mount_point: &str,
        format: &dyn CatalogFormat,
        index_file: &str,
    ) -> ModResult<MergeOutcome> {
        let index_path = format!("{mount_point}{index_file}");
        let Some(bytes) = vfs.read(&index_path)? else {
            debug!(index = %index_path, "Archive has no catalog index");
            return Ok(MergeOutcome::NoIndex);
        };

        let entries = format
            .decode(&bytes)
            .map_err(|e| ModError::CatalogIndex {
                path: index_path.clone(),
                reason: e.to_string(),
            })?;

        let (added, replaced) = self.merge(entries);
        info!(
            index = %index_path,
            format = format.name(),
            bytes = bytes.len(),
            added,
            replaced,
            "Catalog index loaded"
        );

        Ok(MergeOutcome::Merged { added, replaced })
    }

    /// Entry by identity.
    pub fn get(&self, identity: &str) -> Option<&CatalogEntry> {
        self.entries.get(identity)
    }

    /// All entries in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Entries whose name starts with `prefix` (case-sensitive).
    pub fn with_name_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.iter().filter(move |entry| entry.name.starts_with(prefix))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
