use std::collections::HashMap;

use crate::value::Value;

/// Out-of-band metadata attached to an overlay or to its fields.
///
/// Attributes never take part in change tracking.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    /// Attributes scoped to the overlay as a whole
    overlay: HashMap<String, Value>,
    /// Attributes scoped to individual fields, keyed by field name
    fields: HashMap<String, HashMap<String, Value>>,
}

impl AttributeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an overlay-scoped attribute, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.overlay.insert(key.into(), value.into())
    }

    /// Looks up an overlay-scoped attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.overlay.get(key)
    }

    /// Removes an overlay-scoped attribute.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.overlay.remove(key)
    }

    /// Sets a field-scoped attribute, returning the previous value.
    pub fn set_field(
        &mut self,
        field: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    /// Looks up a field-scoped attribute.
    pub fn get_field(&self, field: &str, key: &str) -> Option<&Value> {
        self.fields.get(field).and_then(|attrs| attrs.get(key))
    }

    /// Removes a field-scoped attribute.
    ///
    /// The per-field map is dropped once its last attribute is removed.
    pub fn remove_field(&mut self, field: &str, key: &str) -> Option<Value> {
        let attrs = self.fields.get_mut(field)?;
        let removed = attrs.remove(key);
        if attrs.is_empty() {
            self.fields.remove(field);
        }
        removed
    }

    /// Iterates the attributes of one field, in no particular order.
    pub fn field_attributes<'a>(
        &'a self,
        field: &str,
    ) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|attrs| attrs.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Returns the total number of attributes across all scopes.
    pub fn len(&self) -> usize {
        self.overlay.len() + self.fields.values().map(HashMap::len).sum::<usize>()
    }

    /// Returns `true` if no attribute is set in any scope.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
