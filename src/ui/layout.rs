//! Page frame: header, optional sidebar, content and footer

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::text::line_width;
use super::{ThemeView, about, contact, home};
use crate::app::state::{AppState, Page};
use crate::theme::LayoutVariant;

/// Rows taken by the header, its bottom border included
const HEADER_HEIGHT: u16 = 2;

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 24;

/// Widest the centered container of the minimalist layout gets
pub const CONTAINER_MAX_WIDTH: u16 = 110;

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub footer: Rect,
}

/// Split the screen according to the layout variant
pub fn regions(area: Rect, layout: LayoutVariant) -> Regions {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let (header, main, footer) = (vertical_chunks[0], vertical_chunks[1], vertical_chunks[2]);

    let (sidebar, content) = match layout {
        LayoutVariant::Sidebar => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .split(main);
            (Some(chunks[0]), chunks[1].inner(Margin { horizontal: 2, vertical: 0 }))
        }
        LayoutVariant::Default => (None, centered(main, CONTAINER_MAX_WIDTH)),
        LayoutVariant::Grid => (None, main.inner(Margin { horizontal: 1, vertical: 0 })),
    };

    Regions { header, sidebar, content, footer }
}

/// A horizontally centered slice of `area` at most `max_width` wide
pub fn centered(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect { x: area.x + (area.width - width) / 2, width, ..area }
}

/// A rectangle of the given size centered in `area`, clipped to fit
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the page frame and the current page
pub fn draw(frame: &mut Frame, state: &AppState, view: &ThemeView) {
    let area = frame.area();
    frame.render_widget(Block::default().style(view.base()), area);

    let regions = regions(area, view.layout());

    draw_header(frame, regions.header, state, view);
    if let Some(sidebar) = regions.sidebar {
        draw_sidebar(frame, sidebar, state, view);
    }
    draw_page(frame, regions.content, state, view);
    draw_footer(frame, regions.footer, state, view);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, view: &ThemeView) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(view.border())
        .style(view.surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let theme_label = Line::from(Span::styled(
        format!(" [t] Theme: {} ▾ ", view.config().name),
        view.accent(),
    ));
    let label_width = u16::try_from(line_width(&theme_label)).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(label_width)])
        .split(inner);

    let mut spans = vec![Span::styled(" ◆ MultiTheme ", view.primary())];
    // The sidebar carries navigation in that layout
    if view.layout() != LayoutVariant::Sidebar {
        for page in Page::ALL {
            let style = if page == state.page {
                view.primary().add_modifier(Modifier::UNDERLINED)
            } else {
                view.muted()
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("{} {}", page.index() + 1, page.title()), style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    frame.render_widget(Paragraph::new(theme_label), chunks[1]);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, state: &AppState, view: &ThemeView) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(view.border())
        .title(Span::styled(" Navigation ", view.muted()))
        .style(view.surface());

    let mut lines = vec![Line::default()];
    for page in Page::ALL {
        let label = format!(" {} {}", page.index() + 1, page.sidebar_label());
        let line = if page == state.page {
            Line::from(Span::styled(format!("▸{label}"), view.button()))
        } else {
            Line::from(Span::styled(format!(" {label}"), view.heading()))
        };
        lines.push(line);
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_page(frame: &mut Frame, area: Rect, state: &AppState, view: &ThemeView) {
    let width = area.width as usize;
    let lines = match state.page {
        Page::Home => home::lines(state, view, width),
        Page::About => about::lines(view, width),
        Page::Contact => contact::lines(view, width),
    };

    let scroll = clamp_scroll(state.scroll, lines.len(), area.height);
    let paragraph = Paragraph::new(lines).style(view.base()).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Keep the last page of content on screen when scrolled past the end
pub fn clamp_scroll(scroll: u16, total_lines: usize, height: u16) -> u16 {
    let max = total_lines.saturating_sub(height as usize).min(u16::MAX as usize) as u16;
    scroll.min(max)
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState, view: &ThemeView) {
    let line = if view.is_transitioning() {
        Line::from(Span::styled(" Applying theme…", view.accent()))
    } else if let Some(status) = &state.status {
        Line::from(Span::styled(format!(" {status}"), view.accent()))
    } else {
        Line::from(Span::styled(
            " 1-3 pages  tab next  j/k scroll  t theme  r retry  q quit",
            view.muted(),
        ))
    };

    frame.render_widget(Paragraph::new(line).style(view.surface()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{contains, render};

    #[test]
    fn default_layout_centers_container() {
        let regions = regions(Rect::new(0, 0, 150, 40), LayoutVariant::Default);
        assert_eq!(regions.sidebar, None);
        assert_eq!(regions.content.width, CONTAINER_MAX_WIDTH);
        assert_eq!(regions.content.x, 20);
        assert_eq!(regions.header.height, HEADER_HEIGHT);
        assert_eq!(regions.footer.y, 39);
    }

    #[test]
    fn sidebar_layout_reserves_navigation() {
        let regions = regions(Rect::new(0, 0, 120, 40), LayoutVariant::Sidebar);
        let sidebar = regions.sidebar.unwrap();
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert!(regions.content.x >= SIDEBAR_WIDTH);
    }

    #[test]
    fn grid_layout_uses_full_width() {
        let regions = regions(Rect::new(0, 0, 150, 40), LayoutVariant::Grid);
        assert_eq!(regions.content.width, 148);
    }

    #[test]
    fn narrow_screen_is_not_padded() {
        assert_eq!(centered(Rect::new(0, 0, 80, 10), CONTAINER_MAX_WIDTH).width, 80);
    }

    #[test]
    fn popup_is_clipped_to_screen() {
        let popup = popup_area(Rect::new(0, 0, 30, 8), 44, 12);
        assert_eq!(popup, Rect::new(0, 0, 30, 8));
        assert_eq!(popup_area(Rect::new(0, 0, 100, 40), 44, 10), Rect::new(28, 15, 44, 10));
    }

    #[test]
    fn scroll_stops_at_last_screen() {
        assert_eq!(clamp_scroll(100, 50, 20), 30);
        assert_eq!(clamp_scroll(5, 10, 20), 0);
        assert_eq!(clamp_scroll(3, 50, 20), 3);
    }

    #[test]
    fn header_shows_active_theme() {
        let buffer = render(&AppState::default(), "theme1", 120, 30);
        assert!(contains(&buffer, "Theme: Default"));
        assert!(contains(&buffer, "1 Home"));
    }

    #[test]
    fn sidebar_layout_lists_pages() {
        let buffer = render(&AppState::default(), "theme2", 120, 30);
        assert!(contains(&buffer, "Dashboard"));
        assert!(contains(&buffer, "About Us"));
        assert!(contains(&buffer, "Theme: Dark"));
    }
}
