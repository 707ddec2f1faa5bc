use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    Refresh,
    OpenInBrowser,
    CycleOrderBy,
    CycleSection,
    CycleMaxResults,
    ShowHelp,
    HideHelp,
    // Search input actions
    SearchStart,
    SearchInputChar(char),
    SearchInputBackspace,
    SearchInputConfirm,
    SearchInputCancel,
}

pub fn handle_key_event(
    key: KeyEvent,
    search_input_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    if search_input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::SearchInputConfirm),
            KeyCode::Esc => Some(AppAction::SearchInputCancel),
            KeyCode::Backspace => Some(AppAction::SearchInputBackspace),
            KeyCode::Char(c) => Some(AppAction::SearchInputChar(c)),
            _ => None,
        };
    }

    // Normal mode
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(AppAction::MoveToTop),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(AppAction::MoveToBottom),

        (KeyCode::Char('/'), _) => Some(AppAction::SearchStart),
        (KeyCode::Char('r'), _) | (KeyCode::F(5), _) => Some(AppAction::Refresh),
        (KeyCode::Char('o'), _) | (KeyCode::Enter, _) => Some(AppAction::OpenInBrowser),

        (KeyCode::Char('O'), _) => Some(AppAction::CycleOrderBy),
        (KeyCode::Char('S'), _) => Some(AppAction::CycleSection),
        (KeyCode::Char('N'), _) => Some(AppAction::CycleMaxResults),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn help_swallows_any_key() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), false, true),
            Some(AppAction::HideHelp)
        );
    }

    #[test]
    fn search_mode_captures_letters() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), true, false),
            Some(AppAction::SearchInputChar('q'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), true, false),
            Some(AppAction::SearchInputConfirm)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), true, false),
            Some(AppAction::SearchInputCancel)
        );
    }

    #[test]
    fn normal_mode_bindings() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), false, false), Some(AppAction::Quit));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), false, false),
            Some(AppAction::Quit)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('/')), false, false), Some(AppAction::SearchStart));
        assert_eq!(handle_key_event(key(KeyCode::Char('r')), false, false), Some(AppAction::Refresh));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT), false, false),
            Some(AppAction::CycleSection)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), false, false), None);
    }
}
