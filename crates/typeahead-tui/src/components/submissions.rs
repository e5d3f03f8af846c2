//! Log of searches handed to the search form.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use typeahead_core::FieldId;

use crate::components::Component;
use crate::theme::Theme;

/// Oldest entries are dropped past this many.
const MAX_SUBMISSIONS: usize = 50;

#[derive(Debug, Clone)]
pub struct Submission {
    pub form_id: String,
    pub field: FieldId,
    pub query: String,
    pub at: DateTime<Local>,
}

#[derive(Default)]
pub struct SubmissionLog {
    entries: Vec<Submission>,
    /// Submissions ever pushed, including dropped ones.
    total: usize,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, submission: Submission) {
        self.entries.push(submission);
        self.total += 1;
        if self.entries.len() > MAX_SUBMISSIONS {
            let excess = self.entries.len() - MAX_SUBMISSIONS;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[Submission] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn last(&self) -> Option<&Submission> {
        self.entries.last()
    }
}

impl Component for SubmissionLog {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Submitted searches ")
            .title_style(Theme::muted())
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let rows = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = if self.entries.is_empty() {
            vec![Line::from(Span::styled("Nothing submitted yet.", Theme::dim()))]
        } else {
            self.entries
                .iter()
                .rev()
                .take(rows)
                .map(|s| {
                    Line::from(vec![
                        Span::styled(format!(" {} ", s.at.format("%H:%M:%S")), Theme::dim()),
                        Span::styled(format!("#{} ", s.form_id), Theme::muted()),
                        Span::styled(format!("[{}] ", s.field), Theme::dim()),
                        Span::styled(s.query.as_str(), Theme::submitted()),
                    ])
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
