//! Key-value record abstraction the overlay reads through to.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// Mutable key-value structure with top-level named fields.
///
/// Reads return owned values; compound values are reference-counted so
/// cloning them is cheap and preserves identity.
pub trait Record {
    /// Returns the stored value of `field`, or `None` when absent.
    fn get_field(&self, field: &str) -> Option<Value>;

    /// Stores `value` under `field`, adding the field if needed.
    fn set_field(&mut self, field: &str, value: Value);

    /// Removes `field`, returning its previous value.
    fn remove_field(&mut self, field: &str) -> Option<Value>;

    /// Returns whether the record holds `field`.
    fn has_field(&self, field: &str) -> bool {
        self.get_field(field).is_some()
    }

    /// Returns the record's own field names in its iteration order.
    fn field_names(&self) -> Vec<String>;
}

impl<S: BuildHasher> Record for IndexMap<String, Value, S> {
    fn get_field(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.insert(field.to_string(), value);
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        self.shift_remove(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.contains_key(field)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn get_field(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.insert(field.to_string(), value);
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        self.remove(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.contains_key(field)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl Record for BTreeMap<String, Value> {
    fn get_field(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.insert(field.to_string(), value);
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        self.remove(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.contains_key(field)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// Borrowed record: the caller keeps ownership and gets it back when the
/// borrow ends.
impl<R: Record + ?Sized> Record for &mut R {
    fn get_field(&self, field: &str) -> Option<Value> {
        (**self).get_field(field)
    }

    fn set_field(&mut self, field: &str, value: Value) {
        (**self).set_field(field, value)
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        (**self).remove_field(field)
    }

    fn has_field(&self, field: &str) -> bool {
        (**self).has_field(field)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }
}

/// Shared record: other holders may keep writing to it while it is tracked.
///
/// Borrows are held only for the duration of a single call.
impl<R: Record> Record for Rc<RefCell<R>> {
    fn get_field(&self, field: &str) -> Option<Value> {
        self.borrow().get_field(field)
    }

    fn set_field(&mut self, field: &str, value: Value) {
        self.borrow_mut().set_field(field, value)
    }

    fn remove_field(&mut self, field: &str) -> Option<Value> {
        self.borrow_mut().remove_field(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.borrow().has_field(field)
    }

    fn field_names(&self) -> Vec<String> {
        self.borrow().field_names()
    }
}
