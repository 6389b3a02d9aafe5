//! Applying handles to a document and comparing them.

mod common;

use common::{registry_with, MockEngine, MockSheet};
use std::collections::HashSet;
use stylecache::{CacheKeyGenerator, StyleCacheError, StyleDescriptor, StyleHandle};

#[test]
fn test_registry_handle_applies_to_many_cells() {
    let (registry, engine) = registry_with(10);
    let mut sheet = MockSheet::new(engine.clone());
    let header = StyleDescriptor::new().bold(true).fill("pattern", "#DDEBF7");

    for col in ["A1", "B1", "C1", "D1"] {
        let handle = registry.get_or_create(&header).unwrap();
        handle.apply(&mut sheet, col).unwrap();
    }

    let ids: HashSet<_> = sheet.cells.values().collect();
    assert_eq!(sheet.cells.len(), 4);
    assert_eq!(ids.len(), 1);
    assert_eq!(engine.calls(), 1);
}

#[test]
fn test_detached_handle_materializes_on_first_apply() {
    let engine = MockEngine::new();
    let mut sheet = MockSheet::new(engine.clone());
    let handle = StyleHandle::detached(
        StyleDescriptor::new().italic(true),
        &CacheKeyGenerator::default(),
    )
    .unwrap();

    assert!(handle.style_id().is_none());
    handle.apply(&mut sheet, "A1").unwrap();
    handle.apply(&mut sheet, "A2").unwrap();

    assert_eq!(engine.calls(), 1);
    assert_eq!(handle.style_id(), Some(sheet.cells["A1"]));
    assert_eq!(sheet.cells["A1"], sheet.cells["A2"]);
}

#[test]
fn test_detached_handle_failed_materialization_retries() {
    let engine = MockEngine::new();
    let mut sheet = MockSheet::new(engine.clone());
    let handle = StyleHandle::detached(
        StyleDescriptor::new().font_color("teal"),
        &CacheKeyGenerator::default(),
    )
    .unwrap();

    assert!(handle.apply(&mut sheet, "A1").unwrap_err().is_materialization());
    assert!(handle.apply(&mut sheet, "A1").is_err());
    assert_eq!(engine.calls(), 2);
    assert!(handle.style_id().is_none());
    assert!(sheet.cells.is_empty());
}

#[test]
fn test_bind_failure_reports_target() {
    let (registry, engine) = registry_with(10);
    let mut sheet = MockSheet::new(engine);
    let handle = registry.get_or_create(&StyleDescriptor::new().bold(true)).unwrap();

    let err = handle.apply(&mut sheet, "").unwrap_err();
    assert!(matches!(err, StyleCacheError::Apply { .. }));
}

#[test]
fn test_equality_survives_registry_reset() {
    let (registry, _) = registry_with(10);
    let d = StyleDescriptor::new().underline(true).font_size(9);

    let before = registry.get_or_create(&d).unwrap();
    registry.clear();
    let after = registry.get_or_create(&d).unwrap();

    assert!(!before.same_instance(&after));
    assert_eq!(before, after);
    assert_eq!(before.key(), after.key());
}

#[test]
fn test_handles_usable_as_set_members() {
    let (registry, _) = registry_with(10);
    let mut set = HashSet::new();
    for _ in 0..3 {
        set.insert(registry.get_or_create(&StyleDescriptor::new().bold(true)).unwrap());
        set.insert(registry.get_or_create(&StyleDescriptor::new().italic(true)).unwrap());
    }
    assert_eq!(set.len(), 2);
}

#[test]
fn test_handle_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StyleHandle>();
    assert_send_sync::<stylecache::StyleRegistry>();
}
