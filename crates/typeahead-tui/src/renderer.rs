//! Capability interfaces between the suggestion controller and the page
//! that owns the search fields.
//!
//! The controller never touches a rendering surface directly; it drives
//! these traits, which lets tests substitute a recording fake.

use typeahead_core::{DropdownEntry, FieldId};

/// Minimal rendering surface for one dropdown per field.
pub trait DropdownRenderer {
    /// Remove every entry of `field`'s dropdown.
    fn clear(&mut self, field: &FieldId);

    /// Append one entry to `field`'s dropdown.
    fn append_entry(&mut self, field: &FieldId, entry: &DropdownEntry);

    /// Make `field`'s dropdown visible and mark its container as having
    /// suggestions.
    fn show(&mut self, field: &FieldId);

    /// Remove `field`'s dropdown and the container marker. Must be a no-op
    /// when nothing is shown.
    fn hide(&mut self, field: &FieldId);

    /// Mark entry `index` as the active one (clearing any other), scrolling
    /// it into view. `None` clears the marker.
    fn set_active(&mut self, field: &FieldId, index: Option<usize>);
}

/// The host page: field values, focus, and the search form.
pub trait SearchPage: DropdownRenderer {
    fn value(&self, field: &FieldId) -> String;

    fn set_value(&mut self, field: &FieldId, value: &str);

    fn focus(&mut self, field: &FieldId);

    fn blur(&mut self, field: &FieldId);

    /// Submit the search form identified by `form_id` with `query`.
    fn submit(&mut self, form_id: &str, field: &FieldId, query: &str);
}
