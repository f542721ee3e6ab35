//! Content namespace prefixes.
//!
//! Every mounted archive gets a package root `/<FileStem>/` that maps onto
//! the `Content/` directory under its mount point, so packages can be
//! addressed without knowing where the archive was mounted.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::vfs::normalize_dir;

/// Package root → content directory table.
#[derive(Debug, Default, Clone)]
pub struct PackageNamespace {
    roots: IndexMap<String, String>,
}

impl PackageNamespace {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `package_root` onto `content_dir`. A later registration of the
    /// same root replaces the earlier target.
    pub fn register(&mut self, package_root: &str, content_dir: &str) {
        let root = normalize_dir(package_root);
        let dir = normalize_dir(content_dir);

        if let Some(previous) = self.roots.insert(root.clone(), dir.clone()) {
            warn!(
                package_root = %root,
                previous = %previous,
                content_dir = %dir,
                "Package root re-registered"
            );
        } else {
            debug!(package_root = %root, content_dir = %dir, "Package root registered");
        }
    }

    /// Translates a package path (`/Root/Sub/Asset`) into a virtual file
    /// path, using the longest matching root.
    pub fn resolve(&self, package_path: &str) -> Option<String> {
        let path = if package_path.ends_with('/') {
            normalize_dir(package_path)
        } else {
            super::vfs::normalize_file(package_path)
        };

        self.roots
            .iter()
            .filter(|(root, _)| {
                path.starts_with(root.as_str()) || path == root.trim_end_matches('/')
            })
            .max_by_key(|(root, _)| root.len())
            .map(|(root, dir)| {
                let rest = path.strip_prefix(root.as_str()).unwrap_or_default();
                format!("{dir}{rest}")
            })
    }

    /// Content directory registered for `package_root`.
    pub fn content_dir(&self, package_root: &str) -> Option<&str> {
        self.roots
            .get(&normalize_dir(package_root))
            .map(String::as_str)
    }

    /// Registered roots in registration order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roots.iter().map(|(r, d)| (r.as_str(), d.as_str()))
    }

    /// Number of registered roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether no roots are registered.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
