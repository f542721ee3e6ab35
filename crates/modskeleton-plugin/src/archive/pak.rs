//! Mod archive container.
//!
//! A mod archive is a zip file. Its mount point comes from the archive
//! itself: the zip comment when present, otherwise the directory prefix
//! shared by every entry, otherwise `/<FileStem>/`. Entry names are
//! addressed relative to that mount point.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use zip::ZipArchive;
use zip::result::ZipError;

use super::CONTENT_DIR;
use super::vfs::normalize_dir;
use crate::error::{ModError, ModResult};

/// An opened, validated mod archive held in memory.
#[derive(Clone)]
pub struct ModArchive {
    /// Source file.
    path: PathBuf,
    /// Normalized mount point (`/a/b/`).
    mount_point: String,
    /// Prefix inside the zip that corresponds to the mount point.
    entry_root: String,
    /// Parsed central directory over the archive bytes.
    archive: ZipArchive<Cursor<Bytes>>,
}

impl std::fmt::Debug for ModArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModArchive")
            .field("path", &self.path)
            .field("mount_point", &self.mount_point)
            .field("entry_root", &self.entry_root)
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ModArchive {
    /// Reads and validates the archive at `path`.
    pub fn open(path: &Path) -> ModResult<Self> {
        let invalid = |reason: String| ModError::InvalidArchive {
            path: path.to_path_buf(),
            reason,
        };

        let data = fs::read(path).map_err(|e| invalid(e.to_string()))?;
        let archive =
            ZipArchive::new(Cursor::new(Bytes::from(data))).map_err(|e| invalid(e.to_string()))?;

        let (mount_point, entry_root) = derive_mount_point(&archive, path);

        Ok(Self {
            path: path.to_path_buf(),
            mount_point,
            entry_root,
            archive,
        })
    }

    /// Source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mount point derived from the archive metadata.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Number of entries, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// File names relative to the mount point (directories excluded).
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .filter_map(|name| name.strip_prefix(self.entry_root.as_str()))
    }

    /// Whether `relative` names a file in this archive.
    pub fn contains(&self, relative: &str) -> bool {
        self.archive.index_for_name(&self.entry_name(relative)).is_some()
    }

    /// Reads a file by mount-relative name. `Ok(None)` if absent.
    pub fn read(&self, relative: &str) -> ModResult<Option<Vec<u8>>> {
        let name = self.entry_name(relative);
        let mut archive = self.archive.clone();
        let mut file = match archive.by_name(&name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(Some(buf))
    }

    fn entry_name(&self, relative: &str) -> String {
        format!("{}{}", self.entry_root, relative.trim_start_matches('/'))
    }
}

/// Returns `(mount_point, entry_root)`.
fn derive_mount_point(archive: &ZipArchive<Cursor<Bytes>>, path: &Path) -> (String, String) {
    let comment = String::from_utf8_lossy(archive.comment());
    let comment = comment.trim();
    if !comment.is_empty() {
        return (normalize_dir(comment), String::new());
    }

    let common = common_directory(archive.file_names());
    if !common.is_empty() {
        return (normalize_dir(&common), common);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (normalize_dir(&stem), String::new())
}

/// Longest directory prefix (`a/b/`) shared by every file entry.
///
/// The prefix stops before a `Content` segment, since package roots map onto
/// `<mount_point>Content/`.
fn common_directory<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut common: Option<Vec<&str>> = None;

    for name in names.filter(|name| !name.ends_with('/')) {
        let mut dirs: Vec<&str> = name.split('/').collect();
        dirs.pop();

        common = Some(match common {
            None => dirs,
            Some(prev) => prev
                .into_iter()
                .zip(dirs)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }

    let content = CONTENT_DIR.trim_end_matches('/');
    let dirs: Vec<&str> = common
        .unwrap_or_default()
        .into_iter()
        .take_while(|dir| *dir != content)
        .collect();

    if dirs.is_empty() {
        String::new()
    } else {
        format!("{}/", dirs.join("/"))
    }
}
