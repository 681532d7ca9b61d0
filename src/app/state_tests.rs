// ABOUTME: Tests for AppState selection, navigation and text input editing

#[cfg(test)]
mod tests {
    use crate::app::state::{AppState, Mode, Navigation, Selection, TextInput};
    use crate::byobu::GatewayError;
    use crate::models::Session;
    use pretty_assertions::assert_eq;

    fn state_with(names: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.apply_fetch(Ok(names
            .iter()
            .enumerate()
            .map(|(i, n)| Session::new(*n, format!("${i}")))
            .collect()));
        state
    }

    #[test]
    fn test_default_selection_focuses_first_row() {
        let state = state_with(&["a", "b", "c"]);
        assert_eq!(state.selection, Selection::Default);
        assert_eq!(state.focused_name().as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_list_has_no_focus() {
        let state = state_with(&[]);
        assert_eq!(state.focused_index(), None);
        assert!(state.focused_session().is_none());
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut state = state_with(&["a", "b", "c"]);

        state.navigate(Navigation::Up);
        assert_eq!(state.focused_name().as_deref(), Some("a"));

        state.navigate(Navigation::Down);
        state.navigate(Navigation::Down);
        state.navigate(Navigation::Down);
        assert_eq!(state.selection, Selection::Named("c".to_string()));

        state.navigate(Navigation::Top);
        assert_eq!(state.focused_name().as_deref(), Some("a"));

        state.navigate(Navigation::PageDown);
        assert_eq!(state.focused_name().as_deref(), Some("c"));

        state.navigate(Navigation::PageUp);
        assert_eq!(state.focused_name().as_deref(), Some("a"));

        state.navigate(Navigation::Bottom);
        assert_eq!(state.focused_name().as_deref(), Some("c"));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut state = state_with(&[]);
        state.navigate(Navigation::Down);
        assert_eq!(state.selection, Selection::Default);
    }

    #[test]
    fn test_request_fetch_snapshots_focus() {
        let mut state = state_with(&["a", "b"]);
        state.navigate(Navigation::Down);

        state.request_fetch();
        assert_eq!(state.remembered_selection.as_deref(), Some("b"));
    }

    #[test]
    fn test_rename_mode_prefills_focused_name() {
        let mut state = state_with(&["work"]);
        assert!(state.enter_rename_mode());

        match &state.mode {
            Mode::RenamingSession { original, input } => {
                assert_eq!(original, "work");
                assert_eq!(input.value(), "work");
                assert_eq!(input.cursor(), 4);
            }
            other => panic!("expected rename mode, got {other:?}"),
        }
    }

    #[test]
    fn test_modes_requiring_focus_refuse_on_empty_list() {
        let mut state = state_with(&[]);
        assert!(!state.enter_rename_mode());
        assert!(!state.enter_kill_mode());
        assert!(!state.attach_selected());
        assert_eq!(state.mode, Mode::Listing);
        assert!(state.exit.is_none());
    }

    #[test]
    fn test_newest_error_replaces_previous() {
        let mut state = AppState::default();
        state.set_error(GatewayError::NotFound("a".to_string()));
        state.set_error(GatewayError::DuplicateName("b".to_string()));
        assert_eq!(
            state.pending_error,
            Some(GatewayError::DuplicateName("b".to_string()))
        );
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new(64);
        for ch in "dve".chars() {
            input.insert_char(ch);
        }
        input.move_cursor_left();
        input.backspace();
        input.move_to_end();
        assert_eq!(input.value(), "de");

        input.move_cursor_left();
        input.insert_char('v');
        assert_eq!(input.value(), "dve");

        input.move_to_start();
        input.delete();
        assert_eq!(input.value(), "ve");
        assert_eq!(input.cursor(), 0);

        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_text_input_respects_limit_and_ignores_controls() {
        let mut input = TextInput::new(3);
        for ch in "abcdef".chars() {
            input.insert_char(ch);
        }
        input.insert_char('\t');
        assert_eq!(input.value(), "abc");

        let prefilled = TextInput::with_value("longer-name", 4);
        assert_eq!(prefilled.value(), "long");
    }

    #[test]
    fn test_text_input_handles_multibyte_chars() {
        let mut input = TextInput::with_value("café", 64);
        input.backspace();
        input.insert_char('é');
        input.move_cursor_left();
        input.move_cursor_left();
        input.delete();
        assert_eq!(input.value(), "caé");
    }
}
