// ABOUTME: Session list component - one row per byobu session with the focused row marked

use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use super::theme::Theme;
use crate::app::AppState;
use crate::models::Session;

pub const EMPTY_MESSAGE: &str = "No byobu sessions. Press 'n' to create one.";
const LOADING_MESSAGE: &str = "Loading sessions...";

pub struct SessionListComponent {
    title: String,
    list_state: ListState,
}

impl SessionListComponent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            list_state: ListState::default(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if state.mode.is_listing() {
                theme.focused_border()
            } else {
                theme.border()
            })
            .title(Line::from(vec![
                Span::styled(format!(" {} ", self.title), theme.title()),
                Span::styled(format!("({}) ", state.sessions.len()), theme.muted()),
            ]));

        if state.sessions.is_empty() {
            let message = if state.loaded {
                EMPTY_MESSAGE
            } else {
                LOADING_MESSAGE
            };
            let paragraph = Paragraph::new(message)
                .style(theme.muted())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = state
            .sessions
            .iter()
            .map(|session| ListItem::new(Self::row(session, theme)))
            .collect();

        self.list_state.select(state.focused_index());

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.highlight())
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn row(session: &Session, theme: &Theme) -> Line<'static> {
        let status_style = if session.is_detached() {
            theme.detached()
        } else {
            theme.attached()
        };

        Line::from(vec![
            Span::styled(session.title().to_string(), theme.text().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(session.description(), status_style),
        ])
    }
}
