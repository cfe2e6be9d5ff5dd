//! Overlays over records loaded from JSON.

use ntest::timeout;
use serde_json::json;

use tracked_core::json::{json_to_value, map_to_json_object};
use tracked_core::{TrackError, Tracked, TrackerConfig, Value};

#[timeout(1000)]
#[test]
fn test_from_json_round_trip_after_commit() -> anyhow::Result<()> {
    let mut tracked = Tracked::from_json(json!({"a": 1, "b": 2}), TrackerConfig::default())?;
    tracked.set("b", json_to_value(json!([1, 2, 3])));
    tracked.set("c", "hello");
    tracked.commit();

    let object = map_to_json_object(tracked.source())?;
    assert_eq!(
        serde_json::Value::Object(object),
        json!({"a": 1, "b": [1, 2, 3], "c": "hello"})
    );
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_from_json_rejects_non_object() {
    let err = Tracked::from_json(json!(42), TrackerConfig::default()).unwrap_err();
    assert_eq!(err, TrackError::NotARecord { found: "number" });
}

#[timeout(1000)]
#[test]
fn test_changes_serialize_in_write_order() -> anyhow::Result<()> {
    let mut tracked = Tracked::from_json(json!({"a": 1}), TrackerConfig::default())?;
    tracked.set("z", true);
    tracked.set("a", Value::Null);

    let changes = map_to_json_object(&tracked.changes())?;
    let rendered = serde_json::to_string(&changes)?;
    assert_eq!(rendered, r#"{"z":true,"a":null}"#);
    Ok(())
}
