//! Change-tracking overlay for mutable key-value records.
//!
//! Wraps a record so that reads behave as usual while writes are buffered,
//! reports which fields differ from the record, and commits or rolls back
//! the buffered writes. Out-of-band attributes can be attached to the
//! overlay or to individual fields.

pub mod config;
pub mod equality;
pub mod error;
pub mod json;
pub mod overlay;
pub mod record;
pub mod value;

pub use config::TrackerConfig;
pub use equality::EqualityPolicy;
pub use error::TrackError;
pub use overlay::{AttributeStore, Change, Tracked};
pub use record::Record;
pub use value::{ObjectMap, Timestamp, Value};
