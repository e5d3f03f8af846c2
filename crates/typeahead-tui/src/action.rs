//! Action enum — the central message bus for the TUI.
//! Terminal input, debounce timers and fetch completions all flow through here.

use typeahead_core::{FieldId, SuggestionSet};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// A tick event for redraws.
    Tick,

    // ── Text Input ──────────────────────────────────────────
    /// A character was typed into the focused field.
    CharInput(char),
    /// Backspace pressed in the focused field.
    BackspaceInput,
    /// Delete the word before the cursor (Ctrl+W).
    DeleteWord,
    /// Move the cursor one character left.
    CursorLeft,
    /// Move the cursor one character right.
    CursorRight,
    /// Move the cursor to the start of the field.
    CursorHome,
    /// Move the cursor to the end of the field.
    CursorEnd,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),
    /// Move focus to the next search field (Tab).
    FocusNextField,

    // ── Suggestion navigation ───────────────────────────────
    /// A navigation key pressed while a field is focused.
    Nav(NavKey),
    /// Left mouse button pressed at a terminal cell.
    Click { column: u16, row: u16 },
    /// Enter pressed with no field focused: submit the last active field.
    SubmitActive,

    // ── Controller events ───────────────────────────────────
    /// The debounce timer for a field fired.
    DebounceElapsed {
        field: FieldId,
        generation: u64,
        query: String,
    },
    /// A suggestion fetch issued for `query` completed.
    SuggestionsLoaded {
        field: FieldId,
        query: String,
        result: Result<SuggestionSet, String>,
    },
}

/// Keys the suggestion controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the focused field instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the focused search field.
    Editing,
}
