//! Integration tests for archive discovery and mounting.

use modskeleton_plugin_sdk::prelude::*;

use crate::helpers::{TestMods, entry};

#[test]
fn test_discover_twice_mounts_once() {
    let mods = TestMods::new();
    mods.archive("Weapons.pak", "/Game/Mods/Weapons/", &[], &[("Content/Bow.uasset", "bow")]);
    mods.archive("Skins.pak", "/Game/Mods/Skins/", &[], &[("Content/Red.uasset", "red")]);

    let mut engine = mods.engine(ClassRegistry::new());
    let first = engine.discover_and_mount(mods.path()).expect("scan");
    assert_eq!(first.mounts.mounted.len(), 2);
    assert_eq!(engine.mounts().records().count(), 2);

    let second = engine.discover_and_mount(mods.path()).expect("rescan");
    assert!(second.mounts.mounted.is_empty());
    assert!(second.merges.is_empty());
    assert_eq!(second.mounts.already_known, 2);
    assert_eq!(engine.mounts().records().count(), 2);
    assert_eq!(engine.mounts().vfs().len(), 2);
}

#[test]
fn test_bad_archives_do_not_abort_scan() {
    let mods = TestMods::new();
    mods.archive("A.pak", "/Game/Shared/", &[], &[("a.txt", "a")]);
    mods.corrupt("B.pak");
    mods.archive("C.pak", "/Game/Shared/", &[], &[("c.txt", "c")]);
    mods.archive(
        "D.pak",
        "/Game/Mods/D/",
        &[entry("D", "MOD_SKELETON_D", "DType")],
        &[],
    );

    let mut engine = mods.engine(ClassRegistry::new());
    let report = engine.scan_for_mod_plugins().expect("scan");

    let mounts = &report.discovery.mounts;
    assert_eq!(mounts.mounted.len(), 2);
    assert_eq!(mounts.failed.len(), 2);
    assert!(mounts.failed[0].path.ends_with("B.pak"));
    assert!(mounts.failed[1].path.ends_with("C.pak"));
    assert_eq!(engine.catalog().len(), 1);

    let again = engine.scan_for_mod_plugins().expect("rescan");
    assert!(again.discovery.mounts.failed.is_empty());
    assert_eq!(again.discovery.mounts.already_known, 4);
}

#[test]
fn test_package_root_resolves_into_archive_content() {
    let mods = TestMods::new();
    mods.archive(
        "Weapons.pak",
        "../../../Game/Plugins/Weapons/",
        &[],
        &[("Content/Blueprints/BP_Bow.uasset", "bow")],
    );

    let mut engine = mods.engine(ClassRegistry::new());
    engine.discover_and_mount(mods.path()).expect("scan");

    let mounts = engine.mounts();
    let resolved = mounts
        .namespace()
        .resolve("/Weapons/Blueprints/BP_Bow.uasset")
        .expect("package root registered");
    assert_eq!(resolved, "/Game/Plugins/Weapons/Content/Blueprints/BP_Bow.uasset");
    assert!(mounts.vfs().exists(&resolved));
    assert_eq!(
        mounts.vfs().read(&resolved).expect("read"),
        Some(b"bow".to_vec())
    );
    assert_eq!(
        mounts.vfs().list("/Game/Plugins/"),
        vec!["/Game/Plugins/Weapons/Content/Blueprints/BP_Bow.uasset".to_string()]
    );
}

#[test]
fn test_missing_mods_directory_is_empty_scan() {
    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());
    let report = engine
        .discover_and_mount(&mods.path().join("NoSuchDir"))
        .expect("scan");
    assert!(report.mounts.mounted.is_empty());
    assert!(report.mounts.failed.is_empty());
}
