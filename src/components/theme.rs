// ABOUTME: Color theme resolved once at startup and passed explicitly into every component

use crate::config::AppConfig;
use ratatui::style::{Color, Modifier, Style};

// Palette
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const WARNING_ORANGE: Color = Color::Rgb(255, 165, 0);
const ERROR_RED: Color = Color::Rgb(230, 80, 80);
const LIST_HIGHLIGHT_BG: Color = Color::Rgb(40, 40, 60);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

/// Styles for every element the UI draws. Monochrome keeps only text
/// modifiers so focus and emphasis still read without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    pub const fn colored() -> Self {
        Self { colored: true }
    }

    pub const fn monochrome() -> Self {
        Self { colored: false }
    }

    /// `config.ui.no_color` already folds in `NO_COLOR` and `--no-color`
    pub const fn from_config(config: &AppConfig) -> Self {
        if config.ui.no_color {
            Self::monochrome()
        } else {
            Self::colored()
        }
    }

    pub const fn is_colored(&self) -> bool {
        self.colored
    }

    fn fg(&self, color: Color) -> Style {
        if self.colored {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    pub fn title(&self) -> Style {
        self.fg(GOLD).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.fg(SUBDUED_BORDER)
    }

    pub fn focused_border(&self) -> Style {
        self.fg(SELECTION_GREEN)
    }

    pub fn text(&self) -> Style {
        self.fg(SOFT_WHITE)
    }

    pub fn muted(&self) -> Style {
        self.fg(MUTED_GRAY)
    }

    pub fn highlight(&self) -> Style {
        if self.colored {
            Style::default()
                .bg(LIST_HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    pub fn attached(&self) -> Style {
        self.fg(SELECTION_GREEN)
    }

    pub fn detached(&self) -> Style {
        self.fg(CORNFLOWER_BLUE)
    }

    pub fn key(&self) -> Style {
        self.fg(GOLD).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        self.fg(WARNING_ORANGE).add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        self.fg(ERROR_RED).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monochrome_drops_colors_but_keeps_modifiers() {
        let theme = Theme::monochrome();
        assert_eq!(theme.text().fg, None);
        assert_eq!(theme.error().fg, None);
        assert!(theme.error().add_modifier.contains(Modifier::BOLD));
        assert!(theme.highlight().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_from_config_honors_no_color() {
        let mut config = AppConfig::default();
        assert!(Theme::from_config(&config).is_colored());

        config.ui.no_color = true;
        assert_eq!(Theme::from_config(&config), Theme::monochrome());
    }
}
