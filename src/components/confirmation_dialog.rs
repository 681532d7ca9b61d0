// ABOUTME: Kill confirmation dialog - centered y/N prompt naming the target session

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::{centered_rect, theme::Theme};

pub struct ConfirmationDialogComponent;

impl ConfirmationDialogComponent {
    pub const fn new() -> Self {
        Self
    }

    pub fn prompt(target: &str) -> String {
        format!("Kill session '{target}'? [y/N]")
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, target: &str, theme: &Theme) {
        let dialog_area = centered_rect(60, 5, area);

        // Clear only the dialog area so the list stays visible behind it
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(" Kill session ", theme.warning()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.warning());

        let text = vec![
            Line::from(Span::styled(Self::prompt(target), theme.text())),
            Line::from(vec![
                Span::styled("y", theme.key()),
                Span::styled(" kill  ", theme.muted()),
                Span::styled("any other key", theme.key()),
                Span::styled(" cancel", theme.muted()),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, dialog_area);
    }
}
