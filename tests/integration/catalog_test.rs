//! Integration tests for catalog merging.

use modskeleton_plugin::catalog::{CatalogFormat, JsonCatalogFormat, MergeOutcome};
use modskeleton_plugin_sdk::prelude::*;

use crate::helpers::{TestMods, entry, register_tagger, tags};

#[test]
fn test_later_archive_wins_identity_collision() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/Mods/A/",
        &[
            entry("Shared", "MOD_SKELETON_X", "TypeFromA"),
            entry("A", "MOD_SKELETON_OnlyA", "TypeFromA"),
        ],
        &[],
    );
    mods.archive(
        "B.pak",
        "/Game/Mods/B/",
        &[entry("Shared", "MOD_SKELETON_X", "TypeFromB")],
        &[],
    );

    let mut classes = ClassRegistry::new();
    register_tagger(&mut classes, "TypeFromA", "a");
    register_tagger(&mut classes, "TypeFromB", "b");
    let mut engine = mods.engine(classes);
    let report = engine.scan_for_mod_plugins().expect("scan");

    assert_eq!(
        report.discovery.merges[1].outcome,
        MergeOutcome::Merged {
            added: 0,
            replaced: 1
        }
    );
    let x = engine
        .catalog()
        .get("/Shared/MOD_SKELETON_X")
        .expect("entry");
    assert_eq!(x.type_name, "TypeFromB");
    assert_eq!(engine.catalog().len(), 2);

    assert!(engine.install_hook(HookDescription::broadcast("Who", "")));
    assert_eq!(tags(&engine.invoke_hook("Who", hook_io![])), vec!["b", "a"]);
}

#[test]
fn test_archive_without_index_is_noop() {
    let mods = TestMods::new();
    mods.archive("Loose.pak", "/Game/Loose/", &[], &[("Content/Rock.uasset", "rock")]);

    let mut engine = mods.engine(ClassRegistry::new());
    let report = engine.discover_and_mount(mods.path()).expect("scan");
    assert_eq!(report.merges[0].outcome, MergeOutcome::NoIndex);
    assert!(engine.catalog().is_empty());
}

#[test]
fn test_enclosing_mount_does_not_hide_earlier_index() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/A/",
        &[entry("A", "MOD_SKELETON_A", "TypeA")],
        &[],
    );
    let stray = JsonCatalogFormat
        .encode(&[entry("B", "B", "TypeB")])
        .expect("encode");
    let stray = String::from_utf8(stray).expect("utf8");
    mods.archive("B.pak", "/Game/", &[], &[("A/AssetRegistry.bin", stray.as_str())]);

    let mut engine = mods.engine(ClassRegistry::new());
    let report = engine.discover_and_mount(mods.path()).expect("scan");

    assert_eq!(report.merges.len(), 2);
    assert_eq!(
        report.merges[0].outcome,
        MergeOutcome::Merged {
            added: 1,
            replaced: 0
        }
    );
    assert_eq!(report.merges[1].outcome, MergeOutcome::NoIndex);

    let identities: Vec<_> = engine
        .catalog()
        .iter()
        .map(|e| e.object_identity.as_str())
        .collect();
    assert_eq!(identities, vec!["/A/MOD_SKELETON_A"]);
}
