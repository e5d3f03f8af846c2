use serde::{Deserialize, Serialize};
use std::fmt;

use crate::highlight::{highlight, Markup};

/// Stable identifier of a search field on the host page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The result of one suggestion fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    /// The query the server matched against (may be trimmed or lowercased).
    pub normalized_query: String,

    /// Server-ranked candidates, in display order.
    pub candidates: Vec<String>,
}

impl SuggestionSet {
    pub fn new(normalized_query: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            normalized_query: normalized_query.into(),
            candidates,
        }
    }

    /// A set with zero candidates means "no suggestions".
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    /// Project every candidate into a renderable entry, highlighting the
    /// normalized query.
    pub fn entries(&self) -> Vec<DropdownEntry> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| DropdownEntry::new(index, candidate, &self.normalized_query))
            .collect()
    }
}

/// Icon shown in front of every suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryIcon {
    MagnifyingGlass,
}

impl EntryIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            EntryIcon::MagnifyingGlass => "⌕",
        }
    }
}

/// One clickable row of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    /// Zero-based position, used for keyboard addressing.
    pub index: usize,
    /// The raw candidate, written into the field on selection.
    pub candidate: String,
    /// The candidate with the matched query emphasized.
    pub markup: Markup,
    pub icon: EntryIcon,
}

impl DropdownEntry {
    pub fn new(index: usize, candidate: &str, query: &str) -> Self {
        Self {
            index,
            candidate: candidate.to_string(),
            markup: highlight(candidate, query),
            icon: EntryIcon::MagnifyingGlass,
        }
    }
}
