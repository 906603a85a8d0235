//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::Page;

/// Map a key on a page to an action
pub fn page_key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
        KeyCode::Char('1') => Some(Action::GoTo(Page::Home)),
        KeyCode::Char('2') => Some(Action::GoTo(Page::About)),
        KeyCode::Char('3') => Some(Action::GoTo(Page::Contact)),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollTop),
        KeyCode::Char('t') => Some(Action::OpenThemePicker),
        KeyCode::Char('r') => Some(Action::Retry),
        _ => None,
    }
}

/// Map a key while the theme picker is open to an action
pub fn picker_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::PickerDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::PickerUp),
        KeyCode::Enter => Some(Action::ApplyTheme),
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => Some(Action::ClosePicker),
        _ => None,
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    NextPage,
    PrevPage,
    GoTo(Page),
    ScrollUp,
    ScrollDown,
    ScrollTop,

    // Theme picker
    OpenThemePicker,
    ClosePicker,
    PickerUp,
    PickerDown,
    ApplyTheme,

    // Products
    Retry,

    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_quits_on_a_page() {
        assert_eq!(page_key_to_action(KeyCode::Char('q'), KeyModifiers::NONE), Some(Action::Quit));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            page_key_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn digits_jump_to_pages() {
        assert_eq!(
            page_key_to_action(KeyCode::Char('3'), KeyModifiers::NONE),
            Some(Action::GoTo(Page::Contact))
        );
    }

    #[test]
    fn t_opens_and_closes_picker() {
        assert_eq!(
            page_key_to_action(KeyCode::Char('t'), KeyModifiers::NONE),
            Some(Action::OpenThemePicker)
        );
        assert_eq!(picker_key_to_action(KeyCode::Char('t')), Some(Action::ClosePicker));
    }

    #[test]
    fn enter_applies_theme_in_picker() {
        assert_eq!(picker_key_to_action(KeyCode::Enter), Some(Action::ApplyTheme));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(page_key_to_action(KeyCode::Char('x'), KeyModifiers::NONE), None);
        assert_eq!(picker_key_to_action(KeyCode::Char('x')), None);
    }
}
