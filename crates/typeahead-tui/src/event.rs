//! Terminal event handling — captures keyboard, mouse, paste and resize
//! events from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: no field is focused; keys are global shortcuts.
//! - Editing: a search field is focused; printable keys edit it and the
//!   navigation keys are routed to the suggestion controller.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode, NavKey};

/// Encode InputMode as u8 for atomic sharing.
const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

pub(crate) fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop. This blocks and should be spawned in a task.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => {
                    Some(Action::Tick)
                }
                result = tokio::task::spawn_blocking({
                    || {
                        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                            event::read().ok()
                        } else {
                            None
                        }
                    }
                }) => {
                    match result {
                        Ok(Some(event)) => map_event(&self.mode_flag, event),
                        _ => None,
                    }
                }
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }
}

fn map_event(mode_flag: &InputModeFlag, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            map_key(get_input_mode(mode_flag), key)
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Paste(text) => Some(Action::PasteBulk(text)),
        Event::Resize(_, _) => Some(Action::Tick),
        _ => None,
    }
}

fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Editing => map_key_editing(key),
        InputMode::Normal => map_key_normal(key),
    }
}

/// Key mapping when a search field is focused.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('a') => Some(Action::CursorHome),
            KeyCode::Char('e') => Some(Action::CursorEnd),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Down => Some(Action::Nav(NavKey::ArrowDown)),
        KeyCode::Up => Some(Action::Nav(NavKey::ArrowUp)),
        KeyCode::Enter => Some(Action::Nav(NavKey::Enter)),
        KeyCode::Esc => Some(Action::Nav(NavKey::Escape)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::FocusNextField),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode — global shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => Some(Action::FocusNextField),
        KeyCode::Esc => Some(Action::Nav(NavKey::Escape)),
        KeyCode::Enter => Some(Action::SubmitActive),
        _ => None,
    }
}
