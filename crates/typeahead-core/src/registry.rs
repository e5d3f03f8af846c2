//! Tracks the search fields present on a page and which one is active.
//!
//! Keystroke and keydown handling always targets the field that produced the
//! event. The active field only resolves events that carry no field of their
//! own, such as a submission request from outside any field.

use crate::suggestion::FieldId;

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldId>,
    active: Option<usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: impl IntoIterator<Item = FieldId>) -> Self {
        let mut registry = Self::new();
        for field in fields {
            registry.register(field);
        }
        registry
    }

    /// Register a field. Returns false if it was already registered.
    pub fn register(&mut self, field: FieldId) -> bool {
        if self.contains(&field) {
            return false;
        }
        self.fields.push(field);
        true
    }

    pub fn contains(&self, field: &FieldId) -> bool {
        self.position(field).is_some()
    }

    /// Registered fields in registration order.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Record a focus event. Unknown fields are ignored.
    pub fn focus(&mut self, field: &FieldId) -> bool {
        match self.position(field) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// The most recently focused field.
    pub fn active_field(&self) -> Option<&FieldId> {
        self.active.and_then(|idx| self.fields.get(idx))
    }

    /// The field after `field` in registration order, wrapping around.
    pub fn next_after(&self, field: Option<&FieldId>) -> Option<&FieldId> {
        if self.fields.is_empty() {
            return None;
        }
        let next = match field.and_then(|f| self.position(f)) {
            Some(idx) => (idx + 1) % self.fields.len(),
            None => 0,
        };
        self.fields.get(next)
    }

    fn position(&self, field: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}
