//! UI rendering components

pub mod about;
pub mod contact;
pub mod home;
pub mod layout;
pub mod product_card;
pub mod text;
pub mod theme_picker;

use std::sync::Arc;

use ratatui::Frame;
use ratatui::style::{Modifier, Style};

use crate::app::state::AppState;
use crate::theme::{LayoutVariant, RenderEnvironment, ThemeColors, ThemeConfig, ThemeStore};

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, view: &ThemeView) {
    layout::draw(frame, state, view);

    if state.picker.open {
        theme_picker::draw(frame, &state.picker, view);
    }
}

/// What widgets need to know about the active theme
///
/// Colors come from the projected render environment; the layout variant
/// and catalog come from the store.
pub struct ThemeView<'a> {
    colors: &'a ThemeColors,
    config: Arc<ThemeConfig>,
    themes: &'a [Arc<ThemeConfig>],
    transitioning: bool,
}

impl<'a> ThemeView<'a> {
    pub fn new(env: &'a RenderEnvironment, store: &'a ThemeStore) -> Self {
        Self {
            colors: env.colors(),
            config: store.configuration(),
            themes: store.catalog().list(),
            transitioning: store.is_transitioning(),
        }
    }

    pub fn layout(&self) -> LayoutVariant {
        self.config.layout
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// All themes in catalog order
    pub fn themes(&self) -> &[Arc<ThemeConfig>] {
        self.themes
    }

    pub fn colors(&self) -> &ThemeColors {
        self.colors
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Dim everything while a theme switch settles
    fn finish(&self, style: Style) -> Style {
        if self.transitioning { style.add_modifier(Modifier::DIM) } else { style }
    }

    /// Page background and body text
    pub fn base(&self) -> Style {
        self.finish(Style::default().fg(self.colors.text).bg(self.colors.background))
    }

    /// Header, footer and sidebar chrome
    pub fn surface(&self) -> Style {
        self.finish(Style::default().fg(self.colors.text).bg(self.colors.surface))
    }

    pub fn heading(&self) -> Style {
        self.finish(Style::default().fg(self.colors.text).add_modifier(Modifier::BOLD))
    }

    pub fn muted(&self) -> Style {
        self.finish(Style::default().fg(self.colors.text_secondary))
    }

    pub fn primary(&self) -> Style {
        self.finish(Style::default().fg(self.colors.primary).add_modifier(Modifier::BOLD))
    }

    pub fn secondary(&self) -> Style {
        self.finish(Style::default().fg(self.colors.secondary))
    }

    pub fn accent(&self) -> Style {
        self.finish(Style::default().fg(self.colors.accent))
    }

    pub fn border(&self) -> Style {
        self.finish(Style::default().fg(self.colors.border))
    }

    /// Filled call-to-action button
    pub fn button(&self) -> Style {
        self.finish(
            Style::default()
                .fg(self.colors.background)
                .bg(self.colors.primary)
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Outlined secondary button
    pub fn outline_button(&self) -> Style {
        self.finish(Style::default().fg(self.colors.primary).add_modifier(Modifier::UNDERLINED))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{contains, render, themed};
    use super::*;
    use crate::app::state::Page;

    #[test]
    fn view_reads_projected_colors() {
        let (store, env) = themed("theme2");
        let env = env.borrow();
        let view = ThemeView::new(&env, &store);
        assert_eq!(view.layout(), LayoutVariant::Sidebar);
        assert_eq!(view.base().bg, Some(store.configuration().colors.background));
        assert!(!view.is_transitioning());
    }

    #[test]
    fn transition_dims_styles() {
        let (mut store, env) = themed("theme1");
        store.request_theme("theme3").unwrap();
        let env = env.borrow();
        let view = ThemeView::new(&env, &store);
        assert!(view.base().add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn picker_renders_over_page() {
        let mut state = AppState::default();
        state.page = Page::About;
        state.picker.open_at(1);
        let buffer = render(&state, "theme1", 100, 40);
        assert!(contains(&buffer, "Select Theme"));
        assert!(contains(&buffer, "Dark Sidebar Layout"));
    }
}
