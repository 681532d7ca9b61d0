// ABOUTME: Session name entry popup used by both create and rename modes

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::{centered_rect, theme::Theme};
use crate::app::state::{Mode, TextInput};

pub struct NameInputComponent;

impl NameInputComponent {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, mode: &Mode, theme: &Theme) {
        let (title, verb, input) = match mode {
            Mode::CreatingSession { input } => (" New session ".to_string(), "create", input),
            Mode::RenamingSession { original, input } => {
                (format!(" Rename '{original}' "), "rename", input)
            }
            _ => return,
        };

        let popup_area = centered_rect(60, 6, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Span::styled(title, theme.title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.focused_border());
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Help
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled("Session name:", theme.muted())),
            chunks[0],
        );

        let (visible, cursor_col) = Self::visible_window(input, chunks[1].width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(visible, theme.text())),
            chunks[1],
        );
        frame.set_cursor(chunks[1].x + cursor_col as u16, chunks[1].y);

        frame.render_widget(
            Paragraph::new(Self::help_line(verb, theme)),
            chunks[3],
        );
    }

    pub fn help_line(verb: &str, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            Span::styled("[Enter]", theme.key()),
            Span::styled(format!(" {verb}  "), theme.muted()),
            Span::styled("[Esc]", theme.key()),
            Span::styled(" cancel", theme.muted()),
        ])
    }

    /// Slice of the buffer that fits `width` columns with the cursor kept in
    /// view, plus the cursor column inside that slice
    fn visible_window(input: &TextInput, width: usize) -> (String, usize) {
        let chars: Vec<char> = input.value().chars().collect();
        let width = width.max(1);
        let cursor = input.cursor();
        let start = (cursor + 1).saturating_sub(width);
        let visible: String = chars.iter().skip(start).take(width).collect();
        (visible, cursor - start)
    }
}
