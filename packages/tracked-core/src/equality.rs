//! Equality policy deciding whether a write is a change.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Rule used to compare a written value with the value currently stored.
///
/// A write whose value is equal to the stored one under the active policy
/// is a no-op and clears any pending entry for the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityPolicy {
    /// Scalars by value, timestamps by instant, arrays and objects by reference.
    #[default]
    Identity,
    /// Like `Identity`, but arrays and objects compare by content.
    Structural,
}

impl EqualityPolicy {
    /// Returns whether `candidate` counts as the same value as `current`.
    pub fn same(self, current: &Value, candidate: &Value) -> bool {
        match self {
            EqualityPolicy::Identity => current.same_value(candidate),
            EqualityPolicy::Structural => current == candidate,
        }
    }

    /// Compares against a possibly absent stored value.
    ///
    /// An absent field never equals a written value, including `Null`.
    pub fn matches_stored(self, stored: Option<&Value>, candidate: &Value) -> bool {
        stored.is_some_and(|current| self.same(current, candidate))
    }
}
