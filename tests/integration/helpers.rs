//! Shared test helpers for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use modskeleton_plugin::catalog::{CatalogEntry, CatalogFormat, JsonCatalogFormat};
use modskeleton_plugin::engine::{Engine, ScanConfig};
use modskeleton_plugin_sdk::prelude::*;

/// A temporary mods directory
pub struct TestMods {
    /// Backing directory, removed on drop
    dir: TempDir,
}

impl TestMods {
    /// Create an empty mods directory
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a zip archive whose comment is the mount point, with an optional
    /// catalog index and extra files.
    pub fn archive(
        &self,
        file_name: &str,
        mount_point: &str,
        entries: &[CatalogEntry],
        files: &[(&str, &str)],
    ) -> PathBuf {
        let path = self.path().join(file_name);
        let file = File::create(&path).expect("Failed to create archive");
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        if !entries.is_empty() {
            let index = JsonCatalogFormat
                .encode(entries)
                .expect("Failed to encode catalog");
            writer
                .start_file("AssetRegistry.bin", options)
                .expect("Failed to start index");
            writer.write_all(&index).expect("Failed to write index");
        }
        for (name, contents) in files {
            writer.start_file(*name, options).expect("Failed to start file");
            writer
                .write_all(contents.as_bytes())
                .expect("Failed to write file");
        }

        writer.set_comment(mount_point.to_string());
        writer.finish().expect("Failed to finish archive");
        path
    }

    /// Write a file with the archive extension that is not a zip
    pub fn corrupt(&self, file_name: &str) -> PathBuf {
        let path = self.path().join(file_name);
        std::fs::write(&path, b"this is not an archive").expect("Failed to write file");
        path
    }

    /// Engine scanning this directory with the given classes
    pub fn engine(&self, classes: ClassRegistry) -> Engine {
        let config = ScanConfig {
            mods_dir: self.path().to_path_buf(),
            ..ScanConfig::default()
        };
        Engine::new(config, classes)
    }
}

/// Catalog entry under package `/<package>`
pub fn entry(package: &str, name: &str, type_name: &str) -> CatalogEntry {
    CatalogEntry::new(
        name,
        format!("/{package}"),
        format!("/{package}/{name}"),
        type_name,
    )
}

/// Plugin that appends `tag` to the payload of every hook except the
/// bootstrap hook
pub fn tagger(tag: &str) -> Arc<dyn ModObject> {
    let tag = tag.to_string();
    Arc::new(ClosurePlugin::new(tag.clone(), move |hook, mut io| {
        if hook != BOOTSTRAP_HOOK {
            io.push(tag.as_str().into());
        }
        Ok(io)
    }))
}

/// Register a [`tagger`] class under `type_name`
pub fn register_tagger(classes: &mut ClassRegistry, type_name: &str, tag: &str) {
    let tag = tag.to_string();
    classes.register(type_name, move || Ok(tagger(&tag)));
}

/// Payload as strings
pub fn tags(io: &HookIo) -> Vec<&str> {
    io.iter().filter_map(|v| v.as_str()).collect()
}
