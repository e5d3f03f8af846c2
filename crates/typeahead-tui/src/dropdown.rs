//! Dropdown rendering policy on top of the [`DropdownRenderer`] capability.

use typeahead_core::{FieldId, SuggestionSet};

use crate::renderer::DropdownRenderer;

/// Replace `field`'s dropdown with `set`. An empty set hides the dropdown.
/// Returns whether a dropdown is now shown.
pub fn render<R: DropdownRenderer + ?Sized>(
    renderer: &mut R,
    field: &FieldId,
    set: &SuggestionSet,
) -> bool {
    renderer.clear(field);

    if set.is_empty() {
        renderer.hide(field);
        return false;
    }

    for entry in set.entries() {
        renderer.append_entry(field, &entry);
    }
    renderer.set_active(field, None);
    renderer.show(field);
    true
}

/// Hide `field`'s dropdown. Safe to call when nothing is shown.
pub fn hide<R: DropdownRenderer + ?Sized>(renderer: &mut R, field: &FieldId) {
    renderer.hide(field);
}
