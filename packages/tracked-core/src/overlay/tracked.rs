use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::json::record_from_json;
use crate::record::Record;
use crate::value::{ObjectMap, Value};

use super::attributes::AttributeStore;
use super::change::Change;

/// Change-tracking overlay over a single record.
///
/// Reads fall through to the record unless the field has a pending write.
/// Writes are buffered until [`Tracked::commit`] and discarded by
/// [`Tracked::rollback`]. Deletes are the exception: they are applied to the
/// record immediately.
///
/// The overlay caches no record values. Writes made to a shared record by
/// other holders are visible through it at once.
#[derive(Debug)]
pub struct Tracked<R: Record> {
    /// Wrapped record
    source: R,
    /// Buffered writes that differ from the record, in write order
    pending: IndexMap<String, Value>,
    /// Metadata attached to the overlay and its fields
    attributes: AttributeStore,
    config: TrackerConfig,
}

impl<R: Record> Tracked<R> {
    /// Wraps `source` with the default configuration.
    pub fn new(source: R) -> Self {
        Self::with_config(source, TrackerConfig::default())
    }

    /// Wraps `source` with the given configuration.
    pub fn with_config(source: R, config: TrackerConfig) -> Self {
        Self {
            source,
            pending: IndexMap::new(),
            attributes: AttributeStore::new(),
            config,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Reads a field: the pending value if any, else the record's value.
    pub fn get(&self, field: &str) -> Option<Value> {
        match self.pending.get(field) {
            Some(value) => Some(value.clone()),
            None => self.source.get_field(field),
        }
    }

    /// Buffers a write.
    ///
    /// Writing a value equal to the record's current one clears any pending
    /// entry for the field instead. The record is never touched.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        let stored = self.source.get_field(&field);

        if self.config.equality.matches_stored(stored.as_ref(), &value) {
            if self.pending.shift_remove(&field).is_some() {
                tracing::trace!("Field '{}' reverted to stored value", field);
            }
        } else {
            tracing::trace!("Field '{}' staged as {}", field, value.type_name());
            self.pending.insert(field, value);
        }
    }

    /// Deletes a field from both the overlay and the record, immediately.
    ///
    /// Returns the value the record held.
    pub fn delete(&mut self, field: &str) -> Option<Value> {
        let discarded = self.pending.shift_remove(field).is_some();
        let removed = self.source.remove_field(field);
        tracing::debug!(
            "Deleted field '{}' (pending discarded: {}, stored: {})",
            field,
            discarded,
            removed.is_some()
        );
        removed
    }

    /// Returns whether the field exists in the record or has a pending write.
    pub fn has(&self, field: &str) -> bool {
        self.pending.contains_key(field) || self.source.has_field(field)
    }

    /// Returns the record's own field names.
    ///
    /// Fields that exist only as pending writes are not listed until they
    /// are committed.
    pub fn keys(&self) -> Vec<String> {
        self.source.field_names()
    }

    /// Returns whether `field` has a pending write that differs from the record.
    pub fn is_changed(&self, field: &str) -> bool {
        self.pending
            .get(field)
            .is_some_and(|value| self.deviates(field, value))
    }

    /// Returns whether any field has a pending write that differs from the record.
    pub fn is_any_changed(&self) -> bool {
        self.pending
            .iter()
            .any(|(field, value)| self.deviates(field, value))
    }

    /// Returns the pending values that differ from the record, in write order.
    pub fn changes(&self) -> ObjectMap {
        self.pending
            .iter()
            .filter(|(field, value)| self.deviates(field, value))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    /// Returns each deviating field with both its stored and pending value.
    pub fn change_set(&self) -> Vec<Change> {
        self.pending
            .iter()
            .filter_map(|(field, value)| {
                let old = self.source.get_field(field);
                if self.config.equality.matches_stored(old.as_ref(), value) {
                    return None;
                }
                Some(Change {
                    field: field.clone(),
                    old,
                    new: value.clone(),
                })
            })
            .collect()
    }

    /// Returns the value currently stored in the record, ignoring pending writes.
    pub fn old_value(&self, field: &str) -> Option<Value> {
        self.source.get_field(field)
    }

    /// Returns the number of buffered writes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the wrapped record.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Returns the wrapped record for direct mutation, bypassing the overlay.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwraps the record, dropping pending writes and attributes.
    pub fn into_source(self) -> R {
        self.source
    }

    /// Writes every pending value into the record.
    ///
    /// Pending entries are cleared afterwards unless
    /// `TrackerConfig::clear_on_commit` is off. Returns the number of fields
    /// written.
    pub fn commit(&mut self) -> usize {
        let count = self.pending.len();
        if self.config.clear_on_commit {
            for (field, value) in std::mem::take(&mut self.pending) {
                self.source.set_field(&field, value);
            }
        } else {
            for (field, value) in &self.pending {
                self.source.set_field(field, value.clone());
            }
        }
        if count > 0 {
            tracing::debug!("Committed {} field(s)", count);
        }
        count
    }

    /// Discards every pending write. Returns the number discarded.
    pub fn rollback(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        if count > 0 {
            tracing::debug!("Rolled back {} field(s)", count);
        }
        count
    }

    /// Sets an overlay-scoped attribute, returning the previous value.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.attributes.set(key, value)
    }

    /// Looks up an overlay-scoped attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Removes an overlay-scoped attribute.
    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Sets an attribute on `field`, returning the previous value.
    ///
    /// The field need not exist in the record.
    pub fn set_field_attribute(
        &mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.attributes.set_field(field, key, value)
    }

    /// Looks up an attribute on `field`.
    pub fn field_attribute(&self, field: &str, key: &str) -> Option<&Value> {
        self.attributes.get_field(field, key)
    }

    /// Removes an attribute from `field`.
    pub fn remove_field_attribute(&mut self, field: &str, key: &str) -> Option<Value> {
        self.attributes.remove_field(field, key)
    }

    /// Iterates the attributes attached to `field`.
    pub fn field_attributes<'a>(
        &'a self,
        field: &str,
    ) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.attributes.field_attributes(field)
    }

    /// Returns the attribute store.
    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn deviates(&self, field: &str, value: &Value) -> bool {
        let stored = self.source.get_field(field);
        !self.config.equality.matches_stored(stored.as_ref(), value)
    }
}

impl Tracked<ObjectMap> {
    /// Builds an overlay over a record parsed from a JSON object.
    ///
    /// # Errors
    /// Returns `TrackError::NotARecord` when `json` is not an object.
    pub fn from_json(json: JsonValue, config: TrackerConfig) -> Result<Self> {
        Ok(Self::with_config(record_from_json(json)?, config))
    }
}

/// An overlay is itself a record: callers generic over [`Record`] can be
/// handed a `Tracked` in place of the record it wraps.
impl<R: Record> Record for Tracked<R> {
    fn get_field(&self, field: &str) -> Option<Value> {
        self.get(field)
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.set(field, value)
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        self.delete(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.has(field)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys()
    }
}
