//! Overlays over borrowed, shared, and nested records.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ntest::timeout;

use tracked_core::{ObjectMap, Record, Tracked, Value};

fn bump<R: Record>(record: &mut R, field: &str) {
    let next = record
        .get_field(field)
        .and_then(|value| value.as_i64())
        .unwrap_or(0)
        + 1;
    record.set_field(field, Value::Int(next));
}

#[timeout(1000)]
#[test]
fn test_external_writes_visible_through_shared_record() {
    let shared = Rc::new(RefCell::new(ObjectMap::new()));
    shared
        .borrow_mut()
        .insert("count".to_string(), Value::Int(1));

    let mut tracked = Tracked::new(shared.clone());
    tracked.set("name", "pending");

    shared
        .borrow_mut()
        .insert("count".to_string(), Value::Int(2));
    assert_eq!(tracked.get("count"), Some(Value::Int(2)));
    assert_eq!(tracked.old_value("count"), Some(Value::Int(2)));

    tracked.commit();
    assert_eq!(shared.borrow()["name"], Value::from("pending"));
}

#[timeout(1000)]
#[test]
fn test_external_write_matching_pending_clears_change() {
    let shared = Rc::new(RefCell::new(ObjectMap::new()));
    let mut tracked = Tracked::new(shared.clone());
    tracked.set("x", 5);
    assert!(tracked.is_changed("x"));

    shared.borrow_mut().insert("x".to_string(), Value::Int(5));
    assert!(!tracked.is_changed("x"));
    assert!(tracked.changes().is_empty());
}

#[timeout(1000)]
#[test]
fn test_overlay_is_a_record() {
    let mut tracked = Tracked::new(BTreeMap::<String, Value>::new());
    bump(&mut tracked, "hits");
    bump(&mut tracked, "hits");

    assert_eq!(tracked.get("hits"), Some(Value::Int(2)));
    assert!(tracked.source().is_empty());
    assert!(tracked.has_field("hits"));
    assert!(tracked.field_names().is_empty());
}

#[timeout(1000)]
#[test]
fn test_nested_overlays_commit_one_level_at_a_time() {
    let mut record = ObjectMap::new();
    record.insert("v".to_string(), Value::Int(1));

    let mut outer = Tracked::new(Tracked::new(&mut record));
    outer.set("v", 2);
    assert!(outer.is_changed("v"));
    assert!(!outer.source().is_changed("v"));

    outer.commit();
    assert!(outer.source().is_changed("v"));
    assert_eq!(outer.source().source()["v"], Value::Int(1));

    outer.source_mut().commit();
    drop(outer);
    assert_eq!(record["v"], Value::Int(2));
}

#[timeout(1000)]
#[test]
fn test_into_source_returns_record() {
    let mut tracked = Tracked::new(ObjectMap::new());
    tracked.set("a", 1);
    tracked.commit();
    tracked.set("b", 2);

    let record = tracked.into_source();
    assert_eq!(record.len(), 1);
    assert_eq!(record["a"], Value::Int(1));
}
