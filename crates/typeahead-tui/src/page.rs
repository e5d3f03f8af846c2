//! The terminal search page: owns the search boxes and the submission log,
//! and exposes them to the controller through [`SearchPage`].

use chrono::Local;
use tracing::debug;

use typeahead_core::config::FieldConfig;
use typeahead_core::{DropdownEntry, FieldId};

use crate::components::search_box::SearchBox;
use crate::components::submissions::{Submission, SubmissionLog};
use crate::renderer::{DropdownRenderer, SearchPage};

pub struct TerminalPage {
    boxes: Vec<SearchBox>,
    submissions: SubmissionLog,
}

impl TerminalPage {
    pub fn new(fields: &[FieldConfig]) -> Self {
        let boxes = fields
            .iter()
            .map(|f| {
                let label = if f.label.is_empty() {
                    f.id.to_string()
                } else {
                    f.label.clone()
                };
                SearchBox::new(f.id.clone(), label)
            })
            .collect();
        Self {
            boxes,
            submissions: SubmissionLog::new(),
        }
    }

    pub fn boxes(&self) -> &[SearchBox] {
        &self.boxes
    }

    pub fn field_ids(&self) -> Vec<FieldId> {
        self.boxes.iter().map(|b| b.id.clone()).collect()
    }

    pub fn search_box(&self, field: &FieldId) -> Option<&SearchBox> {
        self.boxes.iter().find(|b| &b.id == field)
    }

    pub fn search_box_mut(&mut self, field: &FieldId) -> Option<&mut SearchBox> {
        self.boxes.iter_mut().find(|b| &b.id == field)
    }

    /// The field currently holding keyboard focus.
    pub fn focused_field(&self) -> Option<&FieldId> {
        self.boxes.iter().find(|b| b.focused).map(|b| &b.id)
    }

    pub fn submissions(&self) -> &SubmissionLog {
        &self.submissions
    }

    /// Tell a field how many dropdown rows fit on screen.
    pub fn set_viewport(&mut self, field: &FieldId, rows: usize) {
        if let Some(b) = self.search_box_mut(field) {
            b.dropdown.set_viewport(rows);
        }
    }
}

impl DropdownRenderer for TerminalPage {
    fn clear(&mut self, field: &FieldId) {
        if let Some(b) = self.search_box_mut(field) {
            b.dropdown.clear();
        }
    }

    fn append_entry(&mut self, field: &FieldId, entry: &DropdownEntry) {
        if let Some(b) = self.search_box_mut(field) {
            b.dropdown.push(entry.clone());
        }
    }

    fn show(&mut self, field: &FieldId) {
        if let Some(b) = self.search_box_mut(field) {
            b.has_suggestions = true;
        }
    }

    fn hide(&mut self, field: &FieldId) {
        if let Some(b) = self.search_box_mut(field) {
            b.dropdown.clear();
            b.has_suggestions = false;
        }
    }

    fn set_active(&mut self, field: &FieldId, index: Option<usize>) {
        if let Some(b) = self.search_box_mut(field) {
            b.dropdown.set_active(index);
        }
    }
}

impl SearchPage for TerminalPage {
    fn value(&self, field: &FieldId) -> String {
        self.search_box(field)
            .map(|b| b.text.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, field: &FieldId, value: &str) {
        if let Some(b) = self.search_box_mut(field) {
            b.set_text(value);
        }
    }

    /// Focus is exclusive: focusing one field blurs every other.
    fn focus(&mut self, field: &FieldId) {
        for b in &mut self.boxes {
            b.focused = &b.id == field;
        }
    }

    fn blur(&mut self, field: &FieldId) {
        if let Some(b) = self.search_box_mut(field) {
            b.focused = false;
        }
    }

    fn submit(&mut self, form_id: &str, field: &FieldId, query: &str) {
        debug!(form = form_id, field = %field, query, "Form submitted");
        self.submissions.push(Submission {
            form_id: form_id.to_string(),
            field: field.clone(),
            query: query.to_string(),
            at: Local::now(),
        });
    }
}
