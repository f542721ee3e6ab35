//! Integration tests for hook registration, connection, and dispatch.

use modskeleton_plugin_sdk::prelude::*;

use crate::helpers::{TestMods, entry, register_tagger, tagger, tags};

#[test]
fn test_install_hook_is_unique() {
    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());

    assert!(engine.install_hook(HookDescription::chained("Foo", "original")));
    assert!(!engine.install_hook(HookDescription::broadcast("Foo", "different")));

    let foo = engine.get_hook_description("Foo").expect("registered");
    assert_eq!(foo.description, "original");
    assert!(!foo.always_invoke);
    assert!(engine.get_hook_description("Bar").is_none());

    assert!(!engine.install_hook(HookDescription::chained(BOOTSTRAP_HOOK, "")));
    let names: Vec<_> = engine.list_hooks().into_iter().map(|h| h.name).collect();
    assert_eq!(names, vec!["Foo", BOOTSTRAP_HOOK]);
}

#[test]
fn test_broadcast_runs_plugins_in_registration_order() {
    let mods = TestMods::new();
    mods.archive(
        "Pack.pak",
        "/Game/Mods/Pack/",
        &[
            entry("Pack", "MOD_SKELETON_P1", "P1"),
            entry("Pack", "MOD_SKELETON_P2", "P2"),
            entry("Pack", "MOD_SKELETON_P3", "P3"),
        ],
        &[],
    );

    let mut classes = ClassRegistry::new();
    for id in ["P1", "P2", "P3"] {
        register_tagger(&mut classes, id, id);
    }
    let mut engine = mods.engine(classes);
    engine.scan_for_mod_plugins().expect("scan");
    assert!(engine.install_hook(HookDescription::broadcast("Init", "")));

    assert_eq!(
        tags(&engine.invoke_hook("Init", hook_io![])),
        vec!["P1", "P2", "P3"]
    );
}

#[test]
fn test_chained_runs_by_priority_then_connection_order() {
    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());
    assert!(engine.install_hook(HookDescription::chained("X", "")));

    engine.connect_hook("X", 5, tagger("A")).expect("A");
    engine.connect_hook("X", 1, tagger("B")).expect("B");
    engine.connect_hook("Other", 0, tagger("Z")).expect("Z");
    engine.connect_hook("X", 5, tagger("C")).expect("C");

    assert_eq!(tags(&engine.invoke_hook("X", hook_io![])), vec!["B", "A", "C"]);
    // The live queue is not consumed by dispatch.
    assert_eq!(tags(&engine.invoke_hook("X", hook_io![])), vec!["B", "A", "C"]);
    // Connected before install, picked up once the hook exists.
    assert!(engine.install_hook(HookDescription::chained("Other", "")));
    assert_eq!(tags(&engine.invoke_hook("Other", hook_io![])), vec!["Z"]);
}

#[test]
fn test_unknown_hook_passes_input_through() {
    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());
    engine.connect_hook("DoesNotExist", 0, tagger("A")).expect("A");

    let result = engine.dispatch_hook("DoesNotExist", hook_io![1, 2, 3]);
    assert!(!result.registered);
    assert_eq!(result.output, hook_io![1, 2, 3]);
    assert_eq!(engine.invoke_hook("DoesNotExist", hook_io![1, 2, 3]), hook_io![1, 2, 3]);
}

#[test]
fn test_connect_rejects_objects_without_hook_support() {
    #[derive(Debug)]
    struct Prop;
    impl_mod_object!(Prop, "Prop");

    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());
    let err = engine
        .connect_hook("X", 0, std::sync::Arc::new(Prop))
        .expect_err("rejected");
    assert!(matches!(err, ModError::CapabilityMismatch { .. }));
    assert!(engine.connections().is_empty());
}

#[test]
fn test_failing_stage_does_not_stop_pipeline() {
    let mods = TestMods::new();
    let mut engine = mods.engine(ClassRegistry::new());
    assert!(engine.install_hook(HookDescription::chained("X", "")));

    engine.connect_hook("X", 0, tagger("A")).expect("A");
    engine
        .connect_hook(
            "X",
            1,
            std::sync::Arc::new(ClosurePlugin::new("Broken", |hook, _| {
                Err(ModError::hook_failed(hook, "Broken", "boom"))
            })),
        )
        .expect("Broken");
    engine.connect_hook("X", 2, tagger("C")).expect("C");

    let result = engine.dispatch_hook("X", hook_io!["start"]);
    assert_eq!(tags(&result.output), vec!["start", "A", "C"]);
    assert_eq!(result.invoked, 3);
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].reason.contains("boom"));
}
