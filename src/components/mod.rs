// ABOUTME: UI components for the TUI interface - session list, dialogs and theme

pub mod confirmation_dialog;
pub mod layout;
pub mod name_input;
pub mod session_list;
pub mod theme;

pub use confirmation_dialog::ConfirmationDialogComponent;
pub use layout::LayoutComponent;
pub use name_input::NameInputComponent;
pub use session_list::SessionListComponent;
pub use theme::Theme;

use ratatui::layout::Rect;

/// Rect of `width` percent and fixed `height` rows centered in `area`
pub(crate) fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let scaled = u32::from(area.width) * u32::from(width_percent) / 100;
    let width = u16::try_from(scaled).unwrap_or(area.width).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
