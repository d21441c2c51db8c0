//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Key bindings of the create discussion screen.
pub struct EventHandler;

impl EventHandler {
    /// Key releases and repeats reported by some terminals are ignored.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }

    /// Checks if key closes the screen.
    #[must_use]
    pub fn is_close_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } | KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Checks if key triggers the header submit action.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('s'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_focus_next(key: &KeyEvent) -> bool {
        key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
    }

    #[must_use]
    pub fn is_focus_previous(key: &KeyEvent) -> bool {
        key.code == KeyCode::BackTab
            || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test_case(KeyCode::Esc, KeyModifiers::NONE, true ; "escape")]
    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, true ; "ctrl_c")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, false ; "q_is_text")]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, false ; "enter")]
    fn test_close_events(code: KeyCode, modifiers: KeyModifiers, expected: bool) {
        assert_eq!(
            EventHandler::is_close_event(&make_key_event(code, modifiers)),
            expected
        );
    }

    #[test]
    fn test_submit_event() {
        assert!(EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Char('s'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_focus_events() {
        assert!(EventHandler::is_focus_next(&make_key_event(
            KeyCode::Tab,
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_focus_previous(&make_key_event(
            KeyCode::BackTab,
            KeyModifiers::SHIFT
        )));
        assert!(!EventHandler::is_focus_next(&make_key_event(
            KeyCode::Tab,
            KeyModifiers::SHIFT
        )));
    }

    #[test]
    fn test_release_is_not_a_press() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(!EventHandler::is_press(&release));
    }
}
