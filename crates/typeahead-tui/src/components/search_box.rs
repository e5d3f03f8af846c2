//! A search field container: the input line with its dropdown beneath it.
//!
//! Text editing mirrors a single-line input (insert, backspace, Ctrl+W,
//! cursor movement). The dropdown is owned by the container so suggestions
//! for one field can never appear inside another.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use typeahead_core::{DropdownEntry, FieldId, Markup};

use crate::components::Component;
use crate::theme::Theme;

/// Rows shown when the real viewport height is not known yet.
const DEFAULT_VIEWPORT: usize = 6;

/// The rendered suggestion list of one field.
#[derive(Debug, Clone)]
pub struct DropdownList {
    entries: Vec<DropdownEntry>,
    active: Option<usize>,
    /// Index of the first visible entry.
    scroll: usize,
    viewport: usize,
}

impl Default for DropdownList {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            active: None,
            scroll: 0,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

impl DropdownList {
    pub fn entries(&self) -> &[DropdownEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.active = None;
        self.scroll = 0;
    }

    pub fn push(&mut self, entry: DropdownEntry) {
        self.entries.push(entry);
    }

    /// Mark one entry active and scroll it to the nearest visible edge.
    pub fn set_active(&mut self, index: Option<usize>) {
        self.active = index.filter(|&i| i < self.entries.len());
        if let Some(i) = self.active {
            self.scroll_into_view(i);
        }
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
        if let Some(i) = self.active {
            self.scroll_into_view(i);
        }
    }

    /// Entry index shown on visible row `row`, if any.
    pub fn index_at_row(&self, row: usize) -> Option<usize> {
        if row >= self.viewport {
            return None;
        }
        let index = self.scroll + row;
        (index < self.entries.len()).then_some(index)
    }

    fn scroll_into_view(&mut self, index: usize) {
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + self.viewport {
            self.scroll = index + 1 - self.viewport;
        }
    }

    fn visible(&self) -> impl Iterator<Item = &DropdownEntry> {
        self.entries.iter().skip(self.scroll).take(self.viewport)
    }
}

/// Screen regions of one field container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub container: Rect,
    pub input: Rect,
    pub dropdown: Rect,
}

impl FieldLayout {
    pub fn from_container(container: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(container);
        let [input, dropdown] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        Self {
            container,
            input,
            dropdown,
        }
    }
}

pub struct SearchBox {
    pub id: FieldId,
    pub label: String,
    /// Current text of the field.
    pub text: String,
    /// Cursor position (byte offset) within the text.
    pub cursor: usize,
    pub focused: bool,
    /// Whether the container carries the "has suggestions" marker.
    pub has_suggestions: bool,
    pub dropdown: DropdownList,
}

impl SearchBox {
    pub fn new(id: FieldId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            text: String::new(),
            cursor: 0,
            focused: false,
            has_suggestions: false,
            dropdown: DropdownList::default(),
        }
    }

    /// Replace the text, moving the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor position (for paste). Newlines are
    /// flattened to spaces since the field is a single line.
    pub fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let flat: String = s
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.text.insert_str(self.cursor, &flat);
        self.cursor += flat.len();
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        self.clamp_cursor();
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        let bytes = self.text.as_bytes();
        let mut end = self.cursor;
        while end > 0 && bytes[end - 1] == b' ' {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && bytes[start - 1] != b' ' {
            start -= 1;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.clamp_cursor();
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        self.clamp_cursor();
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let line = if self.text.is_empty() && !self.focused {
            Line::from(Span::styled("Type to search…", Theme::dim()))
        } else if self.focused {
            let pos = self.cursor.min(self.text.len());
            let (before, after) = self.text.split_at(pos);
            let mut rest = after.chars();
            let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
            Line::from(vec![
                Span::styled(before, Theme::normal()),
                Span::styled(cursor_char, Theme::cursor()),
                Span::styled(rest.as_str(), Theme::normal()),
            ])
        } else {
            Line::from(Span::styled(self.text.as_str(), Theme::normal()))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_dropdown(&self, frame: &mut Frame, area: Rect) {
        if !self.has_suggestions {
            return;
        }
        let lines: Vec<Line> = self
            .dropdown
            .visible()
            .map(|entry| {
                let style = if self.dropdown.active == Some(entry.index) {
                    Theme::active_entry()
                } else {
                    Style::default()
                };
                entry_line(entry).style(style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn entry_line(entry: &DropdownEntry) -> Line<'_> {
    let mut spans = vec![Span::styled(format!(" {} ", entry.icon.glyph()), Theme::icon())];
    match &entry.markup {
        Markup::Plain(text) => spans.push(Span::styled(text.as_str(), Theme::muted())),
        Markup::Emphasized {
            prefix,
            matched,
            suffix,
        } => {
            spans.push(Span::styled(prefix.as_str(), Theme::muted()));
            spans.push(Span::styled(matched.as_str(), Theme::emphasis()));
            spans.push(Span::styled(suffix.as_str(), Theme::muted()));
        }
    }
    Line::from(spans)
}

impl Component for SearchBox {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = FieldLayout::from_container(area);
        let border_style = if self.has_suggestions {
            Theme::has_suggestions()
        } else if self.focused {
            Style::default().fg(Theme::accent())
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .title_style(if self.focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(border_style);
        frame.render_widget(block, area);

        self.render_input(frame, layout.input);
        self.render_dropdown(frame, layout.dropdown);
    }
}
