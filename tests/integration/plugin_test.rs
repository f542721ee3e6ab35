//! Integration tests for plugin resolution.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modskeleton_plugin_sdk::prelude::*;

use crate::helpers::{TestMods, entry, register_tagger, tags};

#[derive(Debug, Default)]
struct WeaponsMod;
impl_mod_plugin!(WeaponsMod, "WeaponsMod");

impl ModPlugin for WeaponsMod {
    fn invoke_hook(&self, hook: &str, mut io: HookIo) -> ModResult<HookIo> {
        if hook == "OnActorSpawn" {
            io.push("weapons".into());
        }
        Ok(io)
    }

    fn hook_connections(&self) -> Vec<HookInterest> {
        vec![HookInterest::new("OnActorSpawn", 10)]
    }
}

#[derive(Debug, Default)]
struct WeaponTable;
impl_mod_object!(WeaponTable, "WeaponTable");

export_mod_classes! {
    "WeaponsMod" => WeaponsMod,
    "WeaponTable" => WeaponTable,
}

#[test]
fn test_resolving_twice_does_not_duplicate() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/Mods/A/",
        &[
            entry("A", "MOD_SKELETON_One", "One"),
            entry("A", "MOD_SKELETON_Two", "Two"),
        ],
        &[],
    );

    let mut classes = ClassRegistry::new();
    register_tagger(&mut classes, "One", "one");
    register_tagger(&mut classes, "Two", "two");
    let mut engine = mods.engine(classes);

    let first = engine.scan_for_mod_plugins().expect("scan");
    assert_eq!(first.resolve.loaded.len(), 2);

    let second = engine.resolve_plugins();
    assert!(second.loaded.is_empty());
    assert_eq!(second.already_loaded, 2);
    assert_eq!(engine.list_mod_plugins().count(), 2);
}

#[test]
fn test_bootstrap_runs_once_per_plugin_at_resolve() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/Mods/A/",
        &[
            entry("A", "MOD_SKELETON_One", "Counted"),
            entry("A", "MOD_SKELETON_Two", "Counted"),
        ],
        &[],
    );

    let bootstraps = Arc::new(AtomicUsize::new(0));
    let counter = bootstraps.clone();
    let mut classes = ClassRegistry::new();
    classes.register("Counted", move || {
        let counter = counter.clone();
        Ok(Arc::new(ClosurePlugin::new("Counted", move |hook, io| {
            if hook == BOOTSTRAP_HOOK {
                assert!(io.is_empty());
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok(io)
        })) as Arc<dyn ModObject>)
    });

    let mut engine = mods.engine(classes);
    engine.scan_for_mod_plugins().expect("scan");
    assert_eq!(bootstraps.load(Ordering::SeqCst), 2);

    engine.scan_for_mod_plugins().expect("rescan");
    assert_eq!(bootstraps.load(Ordering::SeqCst), 2);
}

#[test]
fn test_only_prefixed_resolvable_plugins_load() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/Mods/A/",
        &[
            entry("A", "MOD_SKELETON_Weapons", "WeaponsMod"),
            entry("A", "MOD_SKELETON_Table", "WeaponTable"),
            entry("A", "MOD_SKELETON_Ghost", "NotAType"),
            entry("A", "mod_skeleton_lower", "WeaponsMod"),
            entry("A", "SM_Rock", "WeaponsMod"),
        ],
        &[],
    );

    let mut classes = ClassRegistry::new();
    modskeleton_register_classes(&mut classes);
    let mut engine = mods.engine(classes);
    assert!(engine.install_hook(HookDescription::chained("OnActorSpawn", "")));

    let report = engine.scan_for_mod_plugins().expect("scan");
    assert_eq!(report.resolve.loaded, vec!["/A/MOD_SKELETON_Weapons"]);
    assert_eq!(report.resolve.rejected, vec!["/A/MOD_SKELETON_Table"]);
    assert_eq!(report.resolve.unresolved, vec!["/A/MOD_SKELETON_Ghost"]);

    let loaded: Vec<_> = engine.list_mod_plugins().map(|p| p.class_name.as_str()).collect();
    assert_eq!(loaded, vec!["WeaponsMod"]);

    assert_eq!(engine.connections().len(), 1);
    assert_eq!(
        tags(&engine.invoke_hook("OnActorSpawn", hook_io!["spawn"])),
        vec!["spawn", "weapons"]
    );
}

#[test]
fn test_failing_factory_is_skipped() {
    let mods = TestMods::new();
    mods.archive(
        "A.pak",
        "/Game/Mods/A/",
        &[
            entry("A", "MOD_SKELETON_Bad", "Faulty"),
            entry("A", "MOD_SKELETON_Good", "Good"),
        ],
        &[],
    );

    let mut classes = ClassRegistry::new();
    classes.register("Faulty", || {
        Err(ModError::Instantiation {
            class_name: "Faulty".to_string(),
            reason: "missing dependency".to_string(),
        })
    });
    register_tagger(&mut classes, "Good", "good");

    let mut engine = mods.engine(classes);
    let report = engine.scan_for_mod_plugins().expect("scan");
    assert_eq!(report.resolve.failed.len(), 1);
    assert_eq!(report.resolve.failed[0].identity, "/A/MOD_SKELETON_Bad");
    assert_eq!(report.resolve.loaded, vec!["/A/MOD_SKELETON_Good"]);
}
