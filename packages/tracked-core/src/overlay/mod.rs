//! Change-tracking overlay, change reports, and attribute storage.

mod attributes;
mod change;
mod tracked;

pub use attributes::AttributeStore;
pub use change::Change;
pub use tracked::Tracked;
