//! Help overlay — keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::{Action, NavKey};
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(vertical[1]);

        horizontal[1]
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            Action::Nav(NavKey::Escape) | Action::Click { .. } if self.visible => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 55, 19);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("Ctrl+C", "Quit"),
            key_line("q", "Quit (no field focused)"),
            key_line("?", "Toggle this help"),
            key_line("Tab / /", "Focus next search field"),
            key_line("Enter", "Search last field (none focused)"),
            Line::from(""),
            Line::from(Span::styled("── In a search field ──", Theme::header())),
            Line::from(""),
            key_line("Down / Up", "Highlight next / previous"),
            key_line("Enter", "Search highlighted or typed"),
            key_line("Esc", "Close suggestions, leave field"),
            key_line("Ctrl+W", "Delete word"),
            key_line("Left / Right", "Move cursor"),
            key_line("Click", "Pick a suggestion"),
            key_line("Click outside", "Close all suggestions"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
