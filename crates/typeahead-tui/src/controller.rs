//! Search-as-you-type controller.
//!
//! One [`ControllerState`] is kept per registered field. Keystrokes are
//! debounced per field, fetches run as background tasks and report back on
//! the action channel, and a response is only rendered if its query is still
//! the latest one issued for that field.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use typeahead_client::SuggestionSource;
use typeahead_core::config::ControllerConfig;
use typeahead_core::{FieldId, FieldRegistry, SuggestionSet};

use crate::action::{Action, NavKey};
use crate::dropdown;
use crate::renderer::SearchPage;

/// Tunables of the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub form_id: String,
}

impl ControllerSettings {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            debounce: config.debounce(),
            form_id: config.form_id.clone(),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

/// Per-field controller state.
#[derive(Debug, Default)]
pub struct ControllerState {
    /// Highlighted entry; `None` means no selection.
    focused_index: Option<usize>,
    /// The one outstanding debounce timer, if any.
    pending_debounce: Option<JoinHandle<()>>,
    /// Bumped every time the outstanding timer is cancelled; a timer whose
    /// generation is behind has been superseded, even if it already fired.
    generation: u64,
    /// Query of the most recent fetch. Responses for anything else are stale.
    last_issued_query: Option<String>,
    /// Suggestions currently shown in the dropdown.
    active_set: Option<SuggestionSet>,
}

impl ControllerState {
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    #[cfg(test)]
    pub(crate) fn last_issued_query(&self) -> Option<&str> {
        self.last_issued_query.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.active_set.is_some()
    }

    #[cfg(test)]
    pub(crate) fn has_pending_debounce(&self) -> bool {
        self.pending_debounce.is_some()
    }

    fn cancel_debounce(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending_debounce.take() {
            handle.abort();
        }
    }

    fn reset_dropdown(&mut self) {
        self.active_set = None;
        self.focused_index = None;
    }
}

/// Drives the dropdowns of every registered field on a [`SearchPage`].
pub struct InputController<P> {
    page: P,
    source: Arc<dyn SuggestionSource>,
    registry: FieldRegistry,
    states: HashMap<FieldId, ControllerState>,
    settings: ControllerSettings,
    tx: mpsc::UnboundedSender<Action>,
}

impl<P: SearchPage> InputController<P> {
    pub fn new(
        page: P,
        source: Arc<dyn SuggestionSource>,
        settings: ControllerSettings,
        tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            page,
            source,
            registry: FieldRegistry::new(),
            states: HashMap::new(),
            settings,
            tx,
        }
    }

    /// Register a field. Registering twice is a no-op.
    pub fn register(&mut self, field: FieldId) {
        if self.registry.register(field.clone()) {
            debug!(field = %field, "Registered search field");
            self.states.insert(field, ControllerState::default());
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn state(&self, field: &FieldId) -> Option<&ControllerState> {
        self.states.get(field)
    }

    pub fn active_field(&self) -> Option<&FieldId> {
        self.registry.active_field()
    }

    pub fn is_open(&self, field: &FieldId) -> bool {
        self.states.get(field).is_some_and(ControllerState::is_open)
    }

    /// Route controller events arriving on the action channel.
    pub fn handle_action(&mut self, action: &Action) {
        match action {
            Action::DebounceElapsed {
                field,
                generation,
                query,
            } => self.on_debounce_elapsed(field, *generation, query),
            Action::SuggestionsLoaded {
                field,
                query,
                result,
            } => self.on_suggestions(field, query, result),
            _ => {}
        }
    }

    /// Record that the page moved focus to `field`. Unregistered fields
    /// are ignored.
    pub fn on_focus(&mut self, field: &FieldId) -> bool {
        self.registry.focus(field)
    }

    /// Move keyboard focus to `field` and record it as active.
    pub fn focus_field(&mut self, field: &FieldId) {
        if self.on_focus(field) {
            self.page.focus(field);
        }
    }

    /// The text of `field` changed.
    pub fn on_input(&mut self, field: &FieldId, raw_text: &str) {
        let Some(state) = self.states.get_mut(field) else {
            debug!(field = %field, "Input on unregistered field");
            return;
        };
        state.cancel_debounce();

        let query = raw_text.trim();
        if query.is_empty() {
            // Forget the last query so an in-flight response cannot reopen
            // the dropdown.
            state.last_issued_query = None;
            state.reset_dropdown();
            dropdown::hide(&mut self.page, field);
            return;
        }

        let generation = state.generation;
        let delay = self.settings.debounce;
        let tx = self.tx.clone();
        let field = field.clone();
        let query = query.to_string();
        state.pending_debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::DebounceElapsed {
                field,
                generation,
                query,
            });
        }));
    }

    /// A debounce timer fired: issue the fetch unless it was superseded.
    pub fn on_debounce_elapsed(&mut self, field: &FieldId, generation: u64, query: &str) {
        let Some(state) = self.states.get_mut(field) else {
            return;
        };
        if state.generation != generation {
            debug!(field = %field, query, "Ignoring superseded debounce timer");
            return;
        }
        state.pending_debounce = None;
        state.last_issued_query = Some(query.to_string());

        debug!(field = %field, query, "Fetching suggestions");
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let field = field.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let result = source.fetch(&query).await.map_err(|e| e.to_string());
            let _ = tx.send(Action::SuggestionsLoaded {
                field,
                query,
                result,
            });
        });
    }

    /// A fetch completed. Stale responses are dropped without touching the
    /// dropdown.
    pub fn on_suggestions(
        &mut self,
        field: &FieldId,
        query: &str,
        result: &Result<SuggestionSet, String>,
    ) {
        let Some(state) = self.states.get_mut(field) else {
            return;
        };
        if state.last_issued_query.as_deref() != Some(query) {
            debug!(
                field = %field,
                query,
                latest = ?state.last_issued_query,
                "Discarding stale suggestions"
            );
            return;
        }

        match result {
            Ok(set) => {
                state.focused_index = None;
                if dropdown::render(&mut self.page, field, set) {
                    state.active_set = Some(set.clone());
                } else {
                    debug!(field = %field, query, "No suggestions");
                    state.active_set = None;
                }
            }
            Err(e) => {
                warn!(field = %field, query, "Suggestion fetch failed: {}", e);
                state.reset_dropdown();
                dropdown::hide(&mut self.page, field);
            }
        }
    }

    /// Keyboard handling for `field`. Returns true when the key was consumed
    /// and its default behaviour should be suppressed.
    pub fn on_key_down(&mut self, field: &FieldId, key: NavKey) -> bool {
        let Some(state) = self.states.get_mut(field) else {
            return false;
        };

        match key {
            NavKey::ArrowDown | NavKey::ArrowUp => {
                let count = state.active_set.as_ref().map_or(0, SuggestionSet::len);
                if count == 0 {
                    return false;
                }
                let next = match (key, state.focused_index) {
                    (NavKey::ArrowDown, None) => 0,
                    (NavKey::ArrowDown, Some(i)) => (i + 1) % count,
                    (_, None) => count - 1,
                    (_, Some(i)) => (i + count - 1) % count,
                };
                state.focused_index = Some(next);
                self.page.set_active(field, Some(next));
                true
            }
            NavKey::Enter => {
                let selected = state.focused_index.and_then(|i| {
                    state
                        .active_set
                        .as_ref()
                        .and_then(|set| set.get(i))
                        .map(str::to_string)
                });
                match selected {
                    Some(candidate) => self.select(field, &candidate),
                    None => {
                        let value = self.page.value(field);
                        self.submit(field, &value);
                    }
                }
                true
            }
            NavKey::Escape => {
                self.close(field);
                self.page.blur(field);
                true
            }
        }
    }

    /// A dropdown entry was clicked.
    pub fn on_entry_click(&mut self, field: &FieldId, index: usize) -> bool {
        let candidate = self
            .states
            .get(field)
            .and_then(|s| s.active_set.as_ref())
            .and_then(|set| set.get(index))
            .map(str::to_string);
        match candidate {
            Some(candidate) => {
                self.select(field, &candidate);
                true
            }
            None => false,
        }
    }

    /// A click landed outside every field's container: close all dropdowns.
    pub fn on_outside_click(&mut self) {
        let fields = self.registry.fields().to_vec();
        for field in &fields {
            self.close(field);
        }
    }

    /// Submit the active field's current text, for callers with no field
    /// context of their own.
    pub fn submit_active(&mut self) -> bool {
        let Some(field) = self.registry.active_field().cloned() else {
            return false;
        };
        let value = self.page.value(&field);
        self.submit(&field, &value)
    }

    /// Close `field`'s dropdown. Idempotent.
    pub fn close(&mut self, field: &FieldId) {
        if let Some(state) = self.states.get_mut(field) {
            state.reset_dropdown();
        }
        dropdown::hide(&mut self.page, field);
    }

    fn select(&mut self, field: &FieldId, candidate: &str) {
        self.page.set_value(field, candidate);
        self.close(field);
        self.focus_field(field);
        self.submit(field, candidate);
    }

    /// Whitespace-only queries are never submitted.
    fn submit(&mut self, field: &FieldId, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            debug!(field = %field, "Suppressing empty submission");
            return false;
        }
        self.page.set_value(field, query);
        info!(field = %field, form = %self.settings.form_id, query, "Submitting search");
        self.page.submit(&self.settings.form_id, field, query);
        true
    }
}

impl<P> Drop for InputController<P> {
    fn drop(&mut self) {
        for state in self.states.values_mut() {
            state.cancel_debounce();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePage, PageCall, Reply, ScriptedSource};

    const HOME: &str = "search-bar";
    const RESULTS: &str = "search-bar-results";

    struct Harness {
        ctrl: InputController<FakePage>,
        rx: mpsc::UnboundedReceiver<Action>,
        source: Arc<ScriptedSource>,
    }

    impl Harness {
        fn new(fields: &[&str]) -> Self {
            let (tx, rx) = mpsc::unbounded_channel();
            let source = Arc::new(ScriptedSource::new());
            let mut ctrl = InputController::new(
                FakePage::default(),
                source.clone() as Arc<dyn SuggestionSource>,
                ControllerSettings::default(),
                tx,
            );
            for field in fields {
                ctrl.register(FieldId::new(*field));
            }
            Self { ctrl, rx, source }
        }

        fn pump(&mut self) {
            while let Ok(action) = self.rx.try_recv() {
                self.ctrl.handle_action(&action);
            }
        }

        /// Let `ms` milliseconds of paused time pass, dispatching actions as
        /// they arrive.
        async fn settle(&mut self, ms: u64) {
            for _ in 0..ms {
                tokio::time::sleep(Duration::from_millis(1)).await;
                self.pump();
            }
        }

        fn type_text(&mut self, field: &str, text: &str) {
            let field = FieldId::new(field);
            self.ctrl.page_mut().set_value(&field, text);
            self.ctrl.on_input(&field, text);
        }

        fn key(&mut self, field: &str, key: NavKey) -> bool {
            self.ctrl.on_key_down(&FieldId::new(field), key)
        }

        fn focused(&self, field: &str) -> Option<usize> {
            self.ctrl.state(&FieldId::new(field)).unwrap().focused_index()
        }

        async fn open(&mut self, field: &str, query: &str, candidates: &[&str]) {
            self.source.script(query, 0, Reply::ok(query, candidates));
            self.type_text(field, query);
            self.settle(200).await;
            assert!(self.ctrl.is_open(&FieldId::new(field)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_issue_one_fetch() {
        let mut h = Harness::new(&[HOME]);
        h.source.script("cat", 0, Reply::ok("cat", &["cat", "catalog"]));

        h.type_text(HOME, "c");
        h.settle(50).await;
        h.type_text(HOME, "ca");
        h.settle(50).await;
        h.type_text(HOME, "cat");
        h.settle(100).await;
        assert!(h.source.calls().is_empty());

        h.settle(100).await;
        assert_eq!(h.source.calls(), vec!["cat"]);
        assert_eq!(h.ctrl.page().candidates(&FieldId::new(HOME)), vec!["cat", "catalog"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_uses_trimmed_text() {
        let mut h = Harness::new(&[HOME]);
        h.type_text(HOME, "  cat  ");
        h.settle(200).await;
        assert_eq!(h.source.calls(), vec!["cat"]);
        assert_eq!(
            h.ctrl.state(&FieldId::new(HOME)).unwrap().last_issued_query(),
            Some("cat")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_response_is_discarded() {
        let mut h = Harness::new(&[HOME]);
        h.source.script("ca", 300, Reply::ok("ca", &["cab", "cake"]));
        h.source.script("cat", 10, Reply::ok("cat", &["cat", "cats"]));

        h.type_text(HOME, "ca");
        h.settle(160).await;
        assert_eq!(h.source.calls(), vec!["ca"]);

        h.type_text(HOME, "cat");
        h.settle(200).await;
        assert_eq!(h.ctrl.page().candidates(&FieldId::new(HOME)), vec!["cat", "cats"]);

        // The "ca" response lands now and must not replace the newer list.
        h.settle(300).await;
        assert_eq!(h.source.calls(), vec!["ca", "cat"]);
        assert_eq!(h.ctrl.page().candidates(&FieldId::new(HOME)), vec!["cat", "cats"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fired_before_new_keystroke_is_ignored() {
        let mut h = Harness::new(&[HOME]);

        h.type_text(HOME, "ca");
        // The timer fires but its action is not dispatched yet.
        tokio::time::sleep(Duration::from_millis(160)).await;
        h.type_text(HOME, "cat");
        h.pump();
        assert!(h.source.calls().is_empty());

        h.settle(200).await;
        assert_eq!(h.source.calls(), vec!["cat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fired_before_clearing_is_ignored() {
        let mut h = Harness::new(&[HOME]);
        h.source.script("ca", 0, Reply::ok("ca", &["cat", "car"]));

        h.type_text(HOME, "ca");
        // The timer fires but its action is not dispatched yet.
        tokio::time::sleep(Duration::from_millis(160)).await;
        h.type_text(HOME, "");
        h.settle(200).await;

        let home = FieldId::new(HOME);
        assert!(h.source.calls().is_empty());
        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
        assert!(h.ctrl.page().candidates(&home).is_empty());
        assert_eq!(h.ctrl.state(&home).unwrap().last_issued_query(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_hides_without_fetching() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat"]).await;

        h.type_text(HOME, "   ");
        let home = FieldId::new(HOME);
        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
        assert!(!h.ctrl.state(&home).unwrap().has_pending_debounce());

        h.settle(300).await;
        assert_eq!(h.source.calls(), vec!["ca"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_input_cancels_pending_timer() {
        let mut h = Harness::new(&[HOME]);
        h.type_text(HOME, "ca");
        h.settle(100).await;
        h.type_text(HOME, "");
        h.settle(300).await;
        assert!(h.source.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_after_clearing_is_dropped() {
        let mut h = Harness::new(&[HOME]);
        h.source.script("ca", 200, Reply::ok("ca", &["cat"]));

        h.type_text(HOME, "ca");
        h.settle(160).await;
        h.type_text(HOME, "");
        h.settle(300).await;

        assert_eq!(h.source.calls(), vec!["ca"]);
        assert!(!h.ctrl.page().is_visible(&FieldId::new(HOME)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_candidates_hide_dropdown() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat"]).await;

        h.source.script("cax", 0, Reply::ok("cax", &[]));
        h.type_text(HOME, "cax");
        h.settle(200).await;

        let home = FieldId::new(HOME);
        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
        assert!(h.ctrl.page().candidates(&home).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_hides_dropdown() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat"]).await;

        h.source.script("cat", 0, Reply::Fail);
        h.type_text(HOME, "cat");
        h.settle(200).await;

        let home = FieldId::new(HOME);
        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrow_down_wraps_around() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car", "can"]).await;
        assert_eq!(h.focused(HOME), None);

        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(h.key(HOME, NavKey::ArrowDown));
            seen.push(h.focused(HOME));
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);
        assert_eq!(h.ctrl.page().active(&FieldId::new(HOME)), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrow_up_wraps_to_last() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car", "can"]).await;

        assert!(h.key(HOME, NavKey::ArrowUp));
        assert_eq!(h.focused(HOME), Some(2));
        h.key(HOME, NavKey::ArrowUp);
        assert_eq!(h.focused(HOME), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrows_ignored_when_closed() {
        let mut h = Harness::new(&[HOME]);
        assert!(!h.key(HOME, NavKey::ArrowDown));
        assert!(!h.key(HOME, NavKey::ArrowUp));
        assert_eq!(h.focused(HOME), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_content_resets_selection() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car", "can"]).await;
        h.key(HOME, NavKey::ArrowDown);
        h.key(HOME, NavKey::ArrowDown);
        assert_eq!(h.focused(HOME), Some(1));

        h.open(HOME, "car", &["car", "card"]).await;
        assert_eq!(h.focused(HOME), None);
        assert_eq!(h.ctrl.page().active(&FieldId::new(HOME)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_submits_highlighted_candidate() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car", "can"]).await;
        h.key(HOME, NavKey::ArrowDown);
        h.key(HOME, NavKey::ArrowDown);

        assert!(h.key(HOME, NavKey::Enter));

        let home = FieldId::new(HOME);
        let page = h.ctrl.page();
        assert_eq!(
            page.submissions,
            vec![("search-form".to_string(), home.clone(), "car".to_string())]
        );
        assert_eq!(page.value(&home), "car");
        assert!(!page.is_visible(&home));
        assert_eq!(page.focused, Some(home.clone()));
        assert!(!h.ctrl.is_open(&home));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_without_selection_submits_field_text() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car"]).await;
        h.ctrl.page_mut().set_value(&FieldId::new(HOME), "cats and dogs ");

        assert!(h.key(HOME, NavKey::Enter));
        let page = h.ctrl.page();
        assert_eq!(page.submissions.len(), 1);
        assert_eq!(page.submissions[0].2, "cats and dogs");
        assert_eq!(page.value(&FieldId::new(HOME)), "cats and dogs");
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_with_closed_dropdown_submits_field_text() {
        let mut h = Harness::new(&[HOME]);
        h.ctrl.page_mut().set_value(&FieldId::new(HOME), "weather");
        assert!(h.key(HOME, NavKey::Enter));
        assert_eq!(h.ctrl.page().submissions[0].2, "weather");
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_submission_is_suppressed() {
        let mut h = Harness::new(&[HOME]);
        h.type_text(HOME, "   ");
        h.key(HOME, NavKey::Enter);
        h.settle(200).await;
        assert!(h.ctrl.page().submissions.is_empty());
        assert!(h.source.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_closes_and_blurs() {
        let mut h = Harness::new(&[HOME]);
        let home = FieldId::new(HOME);
        h.ctrl.focus_field(&home);
        h.open(HOME, "ca", &["cat"]).await;

        h.key(HOME, NavKey::Escape);
        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
        assert_eq!(h.ctrl.page().focused, None);

        // Escaping again is harmless.
        h.key(HOME, NavKey::Escape);
        assert!(h.ctrl.page().submissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_entry_selects_and_submits() {
        let mut h = Harness::new(&[HOME]);
        h.open(HOME, "ca", &["cat", "car", "can"]).await;

        let home = FieldId::new(HOME);
        assert!(h.ctrl.on_entry_click(&home, 2));
        assert_eq!(h.ctrl.page().value(&home), "can");
        assert_eq!(h.ctrl.page().submissions[0].2, "can");
        assert!(!h.ctrl.is_open(&home));

        assert!(!h.ctrl.on_entry_click(&home, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_never_share_dropdowns() {
        let mut h = Harness::new(&[HOME, RESULTS]);
        let results = FieldId::new(RESULTS);
        h.ctrl.page_mut().set_value(&results, "dogs");

        h.open(HOME, "ca", &["cat", "car"]).await;

        let touched_results = h.ctrl.page().calls.iter().any(|call| match call {
            PageCall::Clear(f)
            | PageCall::Append(f, _)
            | PageCall::Show(f)
            | PageCall::SetActive(f, _) => f == &results,
            _ => false,
        });
        assert!(!touched_results);
        assert!(h.ctrl.page().candidates(&results).is_empty());

        // Keys on the other field do not move this field's selection.
        assert!(!h.key(RESULTS, NavKey::ArrowDown));
        assert_eq!(h.focused(HOME), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_debounce_per_field() {
        let mut h = Harness::new(&[HOME, RESULTS]);
        h.type_text(HOME, "ca");
        h.settle(100).await;
        h.type_text(RESULTS, "do");
        h.settle(100).await;
        // The second field's keystroke did not cancel the first field's timer.
        assert_eq!(h.source.calls(), vec!["ca"]);
        h.settle(100).await;
        assert_eq!(h.source.calls(), vec!["ca", "do"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outside_click_closes_open_dropdown_only() {
        let mut h = Harness::new(&[HOME, RESULTS]);
        let home = FieldId::new(HOME);
        let results = FieldId::new(RESULTS);
        h.ctrl.page_mut().set_value(&results, "dogs");

        h.open(HOME, "ca", &["cat"]).await;
        h.ctrl.on_outside_click();

        assert!(!h.ctrl.is_open(&home));
        assert!(!h.ctrl.page().is_visible(&home));
        assert_eq!(h.ctrl.page().value(&home), "ca");
        assert_eq!(h.ctrl.page().value(&results), "dogs");
        assert!(h.ctrl.page().submissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_active_uses_last_focused_field() {
        let mut h = Harness::new(&[HOME, RESULTS]);
        assert!(!h.ctrl.submit_active());

        let results = FieldId::new(RESULTS);
        h.ctrl.page_mut().set_value(&results, "dogs");
        h.ctrl.on_focus(&results);
        assert_eq!(h.ctrl.active_field(), Some(&results));
        assert!(h.ctrl.submit_active());
        assert_eq!(
            h.ctrl.page().submissions,
            vec![("search-form".to_string(), results, "dogs".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unregistered_field_is_ignored() {
        let mut h = Harness::new(&[HOME]);
        h.type_text("elsewhere", "cat");
        h.settle(200).await;
        assert!(h.source.calls().is_empty());
        assert!(!h.key("elsewhere", NavKey::Enter));
    }
}
