//! Commit and rollback scenarios over a plain record.

use chrono::{TimeZone, Utc};
use ntest::timeout;

use tracked_core::{ObjectMap, Tracked, Value};

fn record_ab() -> ObjectMap {
    let mut record = ObjectMap::new();
    record.insert("a".to_string(), Value::Int(1));
    record.insert("b".to_string(), Value::Int(2));
    record
}

#[timeout(1000)]
#[test]
fn test_write_then_commit() {
    let mut record = record_ab();
    {
        let mut tracked = Tracked::new(&mut record);
        tracked.set("a", 100);
        tracked.set("c", "hello");

        let changes = tracked.changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes["a"], Value::Int(100));
        assert_eq!(changes["c"], Value::from("hello"));
        assert!(tracked.is_any_changed());

        tracked.commit();
    }

    assert_eq!(record.len(), 3);
    assert_eq!(record["a"], Value::Int(100));
    assert_eq!(record["b"], Value::Int(2));
    assert_eq!(record["c"], Value::from("hello"));
}

#[timeout(1000)]
#[test]
fn test_write_then_rollback() {
    let mut record = record_ab();
    {
        let mut tracked = Tracked::new(&mut record);
        tracked.set("a", 100);
        tracked.set("c", "hello");
        tracked.rollback();

        assert_eq!(tracked.get("a"), Some(Value::Int(1)));
        assert_eq!(tracked.get("c"), None);
        assert!(!tracked.is_any_changed());
    }

    assert_eq!(record, record_ab());
}

#[timeout(1000)]
#[test]
fn test_dropping_overlay_discards_pending() {
    let mut record = record_ab();
    {
        let mut tracked = Tracked::new(&mut record);
        tracked.set("a", 100);
    }
    assert_eq!(record, record_ab());
}

#[timeout(1000)]
#[test]
fn test_changes_match_is_changed() {
    let mut tracked = Tracked::new(record_ab());
    tracked.set("a", 10);
    tracked.set("b", 2);
    tracked.set("c", 3);
    tracked.set("c", Value::Null);

    let changes = tracked.changes();
    for field in ["a", "b", "c", "d"] {
        assert_eq!(changes.contains_key(field), tracked.is_changed(field), "{}", field);
    }
    assert_eq!(changes["c"], Value::Null);
}

#[timeout(1000)]
#[test]
fn test_old_value_is_live_record_value() {
    let mut tracked = Tracked::new(record_ab());
    tracked.set("a", "hello");
    tracked.set("a", "world");

    assert_eq!(tracked.get("a"), Some(Value::from("world")));
    assert_eq!(tracked.old_value("a"), Some(Value::Int(1)));

    tracked.commit();
    assert_eq!(tracked.old_value("a"), Some(Value::from("world")));
}

#[timeout(1000)]
#[test]
fn test_repeated_cycles() {
    let mut tracked = Tracked::new(record_ab());
    for round in 0..5i64 {
        tracked.set("a", round * 10 + 7);
        if round % 2 == 0 {
            tracked.commit();
        } else {
            tracked.rollback();
        }
        assert!(!tracked.is_any_changed());
    }
    assert_eq!(tracked.get("a"), Some(Value::Int(47)));
}

#[timeout(1000)]
#[test]
fn test_reassigning_equal_timestamp() {
    let mut record = record_ab();
    record.insert(
        "d".to_string(),
        Value::from(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
    );
    let mut tracked = Tracked::new(record);

    tracked.set("a", 100);
    tracked.set("d", Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

    assert!(tracked.is_changed("a"));
    assert!(!tracked.is_changed("d"));
    assert_eq!(tracked.changes().len(), 1);
}
