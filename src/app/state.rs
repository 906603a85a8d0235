//! Application state definitions

use crate::products::{FetchState, Product};

/// Which page is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    About,
    Contact,
}

impl Page {
    /// Pages in navigation order
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Contact];

    /// Label in the header tabs
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    /// Label in the navigation sidebar
    pub fn sidebar_label(self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            Page::About => "About Us",
            Page::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Page::Home => 0,
            Page::About => 1,
            Page::Contact => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the theme selection popup
#[derive(Debug, Clone, Default)]
pub struct ThemePickerState {
    /// Whether the popup is visible
    pub open: bool,
    /// Highlighted entry (index into the catalog)
    pub selected: usize,
}

impl ThemePickerState {
    /// Show the popup with `index` highlighted
    pub fn open_at(&mut self, index: usize) {
        self.open = true;
        self.selected = index;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the highlight down, wrapping at the end
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the highlight up, wrapping at the start
    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

/// Complete application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Current page
    pub page: Page,
    /// Theme selection popup
    pub picker: ThemePickerState,
    /// Products shown on the home page
    pub products: FetchState<Vec<Product>>,
    /// Whether the last product fetch failed in a way a retry could fix
    pub products_retryable: bool,
    /// Scroll offset of the page content in lines
    pub scroll: u16,
    /// Status message shown in the footer
    pub status: Option<String>,
}

impl AppState {
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cycle_in_both_directions() {
        assert_eq!(Page::Home.next(), Page::About);
        assert_eq!(Page::Contact.next(), Page::Home);
        assert_eq!(Page::Home.prev(), Page::Contact);
    }

    #[test]
    fn sidebar_uses_dashboard_for_home() {
        assert_eq!(Page::Home.sidebar_label(), "Dashboard");
        assert_eq!(Page::About.title(), "About");
    }

    #[test]
    fn picker_selection_wraps() {
        let mut picker = ThemePickerState::default();
        picker.open_at(2);
        picker.select_next(3);
        assert_eq!(picker.selected, 0);
        picker.select_prev(3);
        assert_eq!(picker.selected, 2);
        picker.close();
        assert!(!picker.open);
    }

    #[test]
    fn picker_ignores_empty_catalog() {
        let mut picker = ThemePickerState::default();
        picker.select_next(0);
        picker.select_prev(0);
        assert_eq!(picker.selected, 0);
    }

    #[test]
    fn scroll_saturates_at_top() {
        let mut state = AppState::default();
        state.scroll_up();
        assert_eq!(state.scroll, 0);
        state.scroll_down();
        state.scroll_down();
        assert_eq!(state.scroll, 2);
        state.scroll_to_top();
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn default_state_is_loading_home() {
        let state = AppState::default();
        assert_eq!(state.page, Page::Home);
        assert!(state.products.is_loading());
    }
}
