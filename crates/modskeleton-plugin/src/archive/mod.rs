//! Archive discovery and mounting.
//!
//! [`MountManager`] finds archive files in a directory, mounts each one
//! exactly once into the [`VirtualFs`], and registers a package root for it
//! in the [`PackageNamespace`]. Per-archive failures are logged and skipped.

pub mod namespace;
pub mod pak;
pub mod vfs;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::ModResult;

pub use namespace::PackageNamespace;
pub use pak::ModArchive;
pub use vfs::VirtualFs;

/// Directory under each mount point that package roots map onto.
pub const CONTENT_DIR: &str = "Content/";

/// One discovered archive file.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveRecord {
    /// Normalized archive path.
    pub path: PathBuf,
    /// Mount point, once derived.
    pub mount_point: Option<String>,
    /// Whether the archive is attached to the virtual filesystem.
    pub mounted: bool,
    /// Package root registered for the archive (`/<FileStem>/`).
    pub package_root: Option<String>,
    /// Content directory the package root maps onto.
    pub content_dir: Option<String>,
    /// When the mount completed.
    pub mounted_at: Option<DateTime<Utc>>,
}

impl ArchiveRecord {
    fn failed(path: PathBuf, mount_point: Option<String>) -> Self {
        Self {
            path,
            mount_point,
            mounted: false,
            package_root: None,
            content_dir: None,
            mounted_at: None,
        }
    }
}

/// An archive that was discovered but could not be mounted.
#[derive(Debug, Clone, Serialize)]
pub struct MountFailure {
    /// Archive path.
    pub path: PathBuf,
    /// Error message.
    pub reason: String,
}

/// Outcome of one discovery pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MountReport {
    /// Archives mounted by this pass, in mount order.
    pub mounted: Vec<ArchiveRecord>,
    /// Archives skipped because they were seen on an earlier pass.
    pub already_known: usize,
    /// Archives that failed to open or attach.
    pub failed: Vec<MountFailure>,
}

/// Owns the virtual filesystem, the namespace table, and every archive record.
#[derive(Debug)]
pub struct MountManager {
    /// Archive extension, without the dot.
    extension: String,
    /// Normalized path → record, in discovery order.
    records: IndexMap<PathBuf, ArchiveRecord>,
    /// Mounted archives.
    vfs: VirtualFs,
    /// Package roots.
    namespace: PackageNamespace,
}

impl MountManager {
    /// Creates a manager that picks up files ending in `.{extension}`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            records: IndexMap::new(),
            vfs: VirtualFs::new(),
            namespace: PackageNamespace::new(),
        }
    }

    /// Mounts every not-yet-seen archive in `directory`.
    ///
    /// Files are visited in file-name order, which fixes mount order. A
    /// missing directory is an empty scan; any other listing failure is
    /// returned.
    pub fn discover_and_mount(&mut self, directory: &Path) -> ModResult<MountReport> {
        self.discover_and_mount_with(directory, |_, _| {})
    }

    /// Like [`discover_and_mount`](Self::discover_and_mount), calling
    /// `on_mount` right after each archive attaches and before the next one
    /// is opened.
    pub fn discover_and_mount_with<F>(
        &mut self,
        directory: &Path,
        mut on_mount: F,
    ) -> ModResult<MountReport>
    where
        F: FnMut(&VirtualFs, &ArchiveRecord),
    {
        let mut report = MountReport::default();

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(directory = %directory.display(), "Mods directory does not exist");
                return Ok(report);
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && self.matches_extension(&path) {
                files.push(path);
            }
        }
        files.sort();

        info!(
            directory = %directory.display(),
            extension = %self.extension,
            found = files.len(),
            "Searching for mod archives"
        );

        for file in files {
            let path = normalize_archive_path(&file);
            if self.records.contains_key(&path) {
                report.already_known += 1;
                continue;
            }

            info!(archive = %path.display(), "Attempting archive mount");

            match self.mount_archive(&path) {
                Ok(record) => {
                    on_mount(&self.vfs, &record);
                    report.mounted.push(record.clone());
                    self.records.insert(path, record);
                }
                Err((err, mount_point)) => {
                    error!(archive = %path.display(), error = %err, "Failed to mount archive");
                    report.failed.push(MountFailure {
                        path: path.clone(),
                        reason: err.to_string(),
                    });
                    self.records
                        .insert(path.clone(), ArchiveRecord::failed(path, mount_point));
                }
            }
        }

        Ok(report)
    }

    fn mount_archive(
        &mut self,
        path: &Path,
    ) -> Result<ArchiveRecord, (crate::error::ModError, Option<String>)> {
        let archive = ModArchive::open(path).map_err(|e| (e, None))?;
        let mount_point = archive.mount_point().to_string();
        info!(
            archive = %path.display(),
            mount_point = %mount_point,
            "Archive mount point derived"
        );

        self.vfs
            .mount(archive)
            .map_err(|e| (e, Some(mount_point.clone())))?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let package_root = format!("/{stem}/");
        let content_dir = format!("{mount_point}{CONTENT_DIR}");
        self.namespace.register(&package_root, &content_dir);

        info!(
            archive = %path.display(),
            package_root = %package_root,
            content_dir = %content_dir,
            "Archive mounted"
        );

        Ok(ArchiveRecord {
            path: path.to_path_buf(),
            mount_point: Some(mount_point),
            mounted: true,
            package_root: Some(package_root),
            content_dir: Some(content_dir),
            mounted_at: Some(Utc::now()),
        })
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Every archive ever discovered, in discovery order.
    pub fn records(&self) -> impl Iterator<Item = &ArchiveRecord> {
        self.records.values()
    }

    /// Record for an archive path, if it was discovered.
    pub fn record(&self, path: &Path) -> Option<&ArchiveRecord> {
        self.records.get(&normalize_archive_path(path))
    }

    /// The virtual filesystem.
    pub fn vfs(&self) -> &VirtualFs {
        &self.vfs
    }

    /// The package namespace table.
    pub fn namespace(&self) -> &PackageNamespace {
        &self.namespace
    }
}

/// Canonical form used to key archive records.
fn normalize_archive_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
