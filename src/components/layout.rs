// ABOUTME: Main layout component - session list, error line, bottom menu bar and mode overlays

use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    theme::Theme, ConfirmationDialogComponent, NameInputComponent, SessionListComponent,
};
use crate::app::{AppState, Mode};

pub struct LayoutComponent {
    session_list: SessionListComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    name_input: NameInputComponent,
    theme: Theme,
}

impl LayoutComponent {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            session_list: SessionListComponent::new(title),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            name_input: NameInputComponent::new(),
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Session list
                Constraint::Length(1), // Error line
                Constraint::Length(1), // Menu bar
            ])
            .split(frame.size());

        self.session_list
            .render(frame, chunks[0], state, &self.theme);
        self.render_error_line(frame, chunks[1], state);
        self.render_menu_bar(frame, chunks[2]);

        match &state.mode {
            Mode::Listing => {}
            Mode::ConfirmingKill { target } => {
                self.confirmation_dialog
                    .render(frame, chunks[0], target, &self.theme);
            }
            mode @ (Mode::CreatingSession { .. } | Mode::RenamingSession { .. }) => {
                self.name_input.render(frame, chunks[0], mode, &self.theme);
            }
        }
    }

    fn render_error_line(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if let Some(error) = &state.pending_error {
            let line = Line::from(Span::styled(format!("Error: {error}"), self.theme.error()));
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (key, label) in [
            ("n", "ew"),
            ("r", "ename"),
            ("k", "ill"),
            ("enter", "attach"),
            ("q", "uit"),
        ] {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{key}]"), self.theme.key()));
            spans.push(Span::styled(label, self.theme.muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
