use crate::value::Value;

/// A single field that currently deviates from the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Name of the changed field
    pub field: String,
    /// Value stored in the record, `None` when the field is new
    pub old: Option<Value>,
    /// Pending value that will be written on commit
    pub new: Value,
}

impl Change {
    /// Returns whether the change introduces a field the record lacks.
    pub fn is_addition(&self) -> bool {
        self.old.is_none()
    }
}
