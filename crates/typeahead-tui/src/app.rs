//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use typeahead_client::SuggestionSource;
use typeahead_core::{FieldId, TypeaheadConfig};

use crate::action::{Action, InputMode, NavKey};
use crate::components::help::HelpComponent;
use crate::components::search_box::{FieldLayout, SearchBox};
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::controller::{ControllerSettings, InputController};
use crate::event::{self, EventHandler, InputModeFlag};
use crate::page::TerminalPage;
use crate::renderer::SearchPage;
use crate::theme::Theme;

/// Height of the submissions pane, borders included.
const SUBMISSIONS_HEIGHT: u16 = 7;

/// Main application state.
pub struct App {
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// Text typed into the first field on startup.
    initial_query: Option<String>,

    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,

    controller: InputController<TerminalPage>,
    /// Field regions from the last frame, used to hit-test clicks.
    layout: Vec<(FieldId, FieldLayout)>,

    // Components
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: &TypeaheadConfig, source: Arc<dyn SuggestionSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Action>();

        let page = TerminalPage::new(&config.fields);
        let settings = ControllerSettings::from_config(&config.controller);
        let mut controller = InputController::new(page, source, settings, tx.clone());
        for field in config.field_ids() {
            controller.register(field);
        }

        Self {
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            initial_query: None,
            tx,
            rx,
            controller,
            layout: Vec::new(),
            status_bar: StatusBarComponent::new(config.endpoint.url.clone()),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the first field from CLI args.
    pub fn set_initial_query(&mut self, query: String) {
        self.initial_query = Some(query);
    }

    pub fn controller(&self) -> &InputController<TerminalPage> {
        &self.controller
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Start the event handler with the shared input mode flag.
        let event_handler = EventHandler::new(
            self.tx.clone(),
            Duration::from_millis(100),
            self.input_mode_flag.clone(),
        );
        tokio::spawn(async move {
            event_handler.run().await;
        });

        info!(
            fields = self.controller.registry().len(),
            "Search page ready"
        );
        self.start();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            match self.rx.recv().await {
                Some(action) => {
                    self.handle_action(&action);
                    if self.should_quit {
                        break;
                    }
                }
                None => break,
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Focus the first field and replay the initial query into it.
    fn start(&mut self) {
        if let Some(first) = self.controller.registry().fields().first().cloned() {
            self.controller.focus_field(&first);
            if let Some(query) = self.initial_query.take() {
                self.controller.page_mut().set_value(&first, &query);
                self.controller.on_input(&first, &query);
            }
        }
        self.sync_input_mode();
    }

    /// Keep the EventHandler's keymap in step with field focus.
    fn sync_input_mode(&self) {
        let mode = if self.focused_field().is_some() && !self.help.visible {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    fn focused_field(&self) -> Option<FieldId> {
        self.controller.page().focused_field().cloned()
    }

    fn handle_action(&mut self, action: &Action) {
        let submitted_before = self.controller.page().submissions().total();

        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Tick | Action::ToggleHelp | Action::SetStatus(_) => {}
            Action::CharInput(c) => self.edit(|b| b.insert_char(*c)),
            Action::BackspaceInput => self.edit(SearchBox::delete_char),
            Action::DeleteWord => self.edit(SearchBox::delete_word),
            Action::PasteBulk(text) => self.edit(|b| b.insert_str(text)),
            Action::CursorLeft => self.edit(SearchBox::move_left),
            Action::CursorRight => self.edit(SearchBox::move_right),
            Action::CursorHome => self.edit(SearchBox::move_home),
            Action::CursorEnd => self.edit(SearchBox::move_end),
            Action::FocusNextField => {
                let current = self.focused_field();
                let next = self
                    .controller
                    .registry()
                    .next_after(current.as_ref())
                    .cloned();
                if let Some(next) = next {
                    self.controller.focus_field(&next);
                }
            }
            Action::Nav(key) => {
                if let Some(field) = self.focused_field() {
                    if !(self.help.visible && *key == NavKey::Escape) {
                        self.controller.on_key_down(&field, *key);
                    }
                }
            }
            Action::Click { column, row } => {
                if !self.help.visible {
                    self.handle_click(*column, *row);
                }
            }
            Action::SubmitActive => {
                if !self.help.visible && self.focused_field().is_none() {
                    self.controller.submit_active();
                }
            }
            Action::DebounceElapsed { .. } | Action::SuggestionsLoaded { .. } => {
                self.controller.handle_action(action);
            }
        }

        self.help.handle_action(action);
        self.status_bar.handle_action(action);

        if self.controller.page().submissions().total() != submitted_before {
            if let Some(last) = self.controller.page().submissions().last() {
                let _ = self.tx.send(Action::SetStatus(format!(
                    "Submitted \"{}\" from {}",
                    last.query, last.field
                )));
            }
        }

        self.sync_input_mode();
    }

    /// Apply an edit to the focused field and report the new text to the
    /// controller if it changed.
    fn edit(&mut self, apply: impl FnOnce(&mut SearchBox)) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(search_box) = self.controller.page_mut().search_box_mut(&field) else {
            return;
        };
        let before = search_box.text.clone();
        apply(search_box);
        if search_box.text != before {
            let text = search_box.text.clone();
            self.controller.on_input(&field, &text);
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);
        let hit = self
            .layout
            .iter()
            .find(|(_, layout)| layout.container.contains(position))
            .cloned();

        let Some((field, layout)) = hit else {
            debug!(column, row, "Click outside every field");
            self.controller.on_outside_click();
            return;
        };

        if layout.dropdown.contains(position) && self.controller.is_open(&field) {
            let index = self
                .controller
                .page()
                .search_box(&field)
                .and_then(|b| b.dropdown.index_at_row((row - layout.dropdown.y) as usize));
            if let Some(index) = index {
                self.controller.on_entry_click(&field, index);
                return;
            }
        }
        self.controller.focus_field(&field);
    }

    /// Render the full UI.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let [header, fields_area, submissions_area, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(SUBMISSIONS_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);

        let ids = self.controller.page().field_ids();
        let containers = field_containers(fields_area, ids.len());
        self.layout = ids
            .into_iter()
            .zip(containers.iter())
            .map(|(id, rect)| (id, FieldLayout::from_container(*rect)))
            .collect();

        for (field, layout) in &self.layout {
            self.controller
                .page_mut()
                .set_viewport(field, layout.dropdown.height as usize);
        }

        let page = self.controller.page();
        for (search_box, rect) in page.boxes().iter().zip(containers.iter()) {
            search_box.render(frame, *rect);
        }
        page.submissions().render(frame, submissions_area);

        self.status_bar.render(frame, status);

        // Overlays (rendered on top)
        self.help.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" typeahead ", Theme::title()),
            Span::styled("search as you type", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Split the fields area evenly between `count` containers.
fn field_containers(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints = vec![Constraint::Ratio(1, count as u32); count];
    Layout::vertical(constraints).split(area).to_vec()
}
