//! Virtual filesystem over mounted archives.
//!
//! Paths are absolute and forward-slash separated. Later mounts shadow
//! earlier ones when their mount points overlap.

use std::collections::BTreeSet;

use tracing::debug;

use super::pak::ModArchive;
use crate::error::{ModError, ModResult};

/// Normalizes a directory path to `/a/b/` form (the root is `/`).
///
/// Backslashes become slashes, empty and `.` segments are dropped, and `..`
/// pops the previous segment. Paths cannot climb above the root, so
/// `../../../Game/` becomes `/Game/`.
pub fn normalize_dir(path: &str) -> String {
    let joined = segments(path).join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        format!("/{joined}/")
    }
}

/// Normalizes a file path to `/a/b/c` form.
pub fn normalize_file(path: &str) -> String {
    format!("/{}", segments(path).join("/"))
}

fn segments(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// A mounted archive and where it lives in the virtual tree.
#[derive(Debug)]
struct Mount {
    mount_point: String,
    archive: ModArchive,
}

/// In-process mount table.
#[derive(Debug, Default)]
pub struct VirtualFs {
    /// Mounts in attach order.
    mounts: Vec<Mount>,
}

impl VirtualFs {
    /// Creates an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `archive` at its mount point.
    ///
    /// Fails with [`ModError::MountConflict`] if the mount point is already
    /// attached to another archive.
    pub fn mount(&mut self, archive: ModArchive) -> ModResult<()> {
        let mount_point = normalize_dir(archive.mount_point());

        if let Some(existing) = self.mounts.iter().find(|m| m.mount_point == mount_point) {
            return Err(ModError::MountConflict {
                path: archive.path().to_path_buf(),
                mount_point,
                reason: format!(
                    "already attached to '{}'",
                    existing.archive.path().display()
                ),
            });
        }

        debug!(
            archive = %archive.path().display(),
            mount_point = %mount_point,
            entries = archive.len(),
            "Archive attached"
        );

        self.mounts.push(Mount {
            mount_point,
            archive,
        });
        Ok(())
    }

    /// Reads a file, newest mount first. `Ok(None)` if no mount has it.
    pub fn read(&self, path: &str) -> ModResult<Option<Vec<u8>>> {
        let path = normalize_file(path);
        for mount in self.mounts.iter().rev() {
            if let Some(relative) = path.strip_prefix(&mount.mount_point) {
                if let Some(bytes) = mount.archive.read(relative)? {
                    return Ok(Some(bytes));
                }
            }
        }
        Ok(None)
    }

    /// Whether any mount provides `path`.
    pub fn exists(&self, path: &str) -> bool {
        let path = normalize_file(path);
        self.mounts.iter().any(|mount| {
            path.strip_prefix(&mount.mount_point)
                .is_some_and(|relative| mount.archive.contains(relative))
        })
    }

    /// Lists every mounted file under `prefix`, sorted and deduplicated.
    pub fn list(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize_dir(prefix);
        let mut files = BTreeSet::new();
        for mount in &self.mounts {
            for name in mount.archive.file_names() {
                let full = format!("{}{}", mount.mount_point, name);
                if full.starts_with(&prefix) {
                    files.insert(full);
                }
            }
        }
        files.into_iter().collect()
    }

    /// Number of attached archives.
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}
