//! Fakes for exercising the controller without a terminal or network.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use typeahead_client::{FetchError, SuggestionSource};
use typeahead_core::{DropdownEntry, FieldId, SuggestionSet};

use crate::renderer::{DropdownRenderer, SearchPage};

#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    Clear(FieldId),
    Append(FieldId, String),
    Show(FieldId),
    Hide(FieldId),
    SetActive(FieldId, Option<usize>),
    SetValue(FieldId, String),
    Focus(FieldId),
    Blur(FieldId),
    Submit(FieldId, String),
}

/// A page that records every call and keeps just enough state to assert on.
#[derive(Debug, Default)]
pub struct FakePage {
    pub calls: Vec<PageCall>,
    pub values: HashMap<FieldId, String>,
    pub entries: HashMap<FieldId, Vec<DropdownEntry>>,
    pub visible: HashSet<FieldId>,
    pub active: HashMap<FieldId, usize>,
    pub focused: Option<FieldId>,
    /// (form id, field, query)
    pub submissions: Vec<(String, FieldId, String)>,
}

impl FakePage {
    pub fn candidates(&self, field: &FieldId) -> Vec<String> {
        self.entries
            .get(field)
            .map(|entries| entries.iter().map(|e| e.candidate.clone()).collect())
            .unwrap_or_default()
    }

    pub fn is_visible(&self, field: &FieldId) -> bool {
        self.visible.contains(field)
    }

    pub fn active(&self, field: &FieldId) -> Option<usize> {
        self.active.get(field).copied()
    }
}

impl DropdownRenderer for FakePage {
    fn clear(&mut self, field: &FieldId) {
        self.calls.push(PageCall::Clear(field.clone()));
        self.entries.remove(field);
        self.active.remove(field);
    }

    fn append_entry(&mut self, field: &FieldId, entry: &DropdownEntry) {
        self.calls
            .push(PageCall::Append(field.clone(), entry.candidate.clone()));
        self.entries.entry(field.clone()).or_default().push(entry.clone());
    }

    fn show(&mut self, field: &FieldId) {
        self.calls.push(PageCall::Show(field.clone()));
        self.visible.insert(field.clone());
    }

    fn hide(&mut self, field: &FieldId) {
        self.calls.push(PageCall::Hide(field.clone()));
        self.visible.remove(field);
        self.entries.remove(field);
        self.active.remove(field);
    }

    fn set_active(&mut self, field: &FieldId, index: Option<usize>) {
        self.calls.push(PageCall::SetActive(field.clone(), index));
        match index {
            Some(idx) => {
                self.active.insert(field.clone(), idx);
            }
            None => {
                self.active.remove(field);
            }
        }
    }
}

impl SearchPage for FakePage {
    fn value(&self, field: &FieldId) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: &FieldId, value: &str) {
        self.calls
            .push(PageCall::SetValue(field.clone(), value.to_string()));
        self.values.insert(field.clone(), value.to_string());
    }

    fn focus(&mut self, field: &FieldId) {
        self.calls.push(PageCall::Focus(field.clone()));
        self.focused = Some(field.clone());
    }

    fn blur(&mut self, field: &FieldId) {
        self.calls.push(PageCall::Blur(field.clone()));
        if self.focused.as_ref() == Some(field) {
            self.focused = None;
        }
    }

    fn submit(&mut self, form_id: &str, field: &FieldId, query: &str) {
        self.calls
            .push(PageCall::Submit(field.clone(), query.to_string()));
        self.submissions
            .push((form_id.to_string(), field.clone(), query.to_string()));
    }
}

/// What the scripted source answers for one query.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(SuggestionSet),
    Fail,
}

impl Reply {
    pub fn ok(normalized: &str, candidates: &[&str]) -> Self {
        Reply::Ok(SuggestionSet::new(
            normalized,
            candidates.iter().map(|c| c.to_string()).collect(),
        ))
    }
}

/// A suggestion source with per-query latency. Unscripted queries answer
/// immediately with no candidates.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, (Duration, Reply)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, query: &str, delay_ms: u64, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(query.to_string(), (Duration::from_millis(delay_ms), reply));
        }
    }

    /// Queries fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSource {
    async fn fetch(&self, query: &str) -> Result<SuggestionSet, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }
        let scripted = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(query).cloned());
        let (delay, reply) = scripted
            .unwrap_or_else(|| (Duration::ZERO, Reply::Ok(SuggestionSet::new(query, vec![]))));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Ok(set) => Ok(set),
            Reply::Fail => Err(FetchError::MalformedPayload("scripted failure".to_string())),
        }
    }
}
