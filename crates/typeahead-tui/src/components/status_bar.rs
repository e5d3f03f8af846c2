//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Endpoint suggestions are fetched from.
    pub endpoint: String,
}

impl StatusBarComponent {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            message: "Start typing to see suggestions.".to_string(),
            endpoint: endpoint.into(),
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Action::SetStatus(msg) = action {
            self.message = msg.clone();
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = "?·Tab·Esc·Ctrl+C";
        let hints_len = hints.chars().count() + 1;

        let badge = self.endpoint.as_str();
        let badge_len = badge.chars().count() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg: String = if self.message.chars().count() > msg_budget {
            if msg_budget > 3 {
                let kept: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{kept}...")
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
