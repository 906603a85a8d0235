//! Theme selection popup

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::ThemeView;
use super::layout::popup_area;
use super::text::fit;
use crate::app::state::ThemePickerState;

const POPUP_WIDTH: u16 = 44;

/// Lines per theme entry
const ENTRY_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, picker: &ThemePickerState, view: &ThemeView) {
    let themes = view.themes();
    let area = popup_area(frame.area(), POPUP_WIDTH, popup_height(themes.len()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(view.primary())
        .title(Span::styled(" Select Theme ", view.primary()))
        .title_bottom(Line::from(Span::styled(" Enter apply · Esc close ", view.muted())).centered())
        .style(view.surface());

    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = entry_lines(picker, view, inner_width);

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Rows needed to list `count` themes inside the border
fn popup_height(count: usize) -> u16 {
    u16::try_from(count)
        .unwrap_or(u16::MAX)
        .saturating_mul(ENTRY_HEIGHT)
        .saturating_add(3)
}

fn entry_lines(picker: &ThemePickerState, view: &ThemeView, width: usize) -> Vec<Line<'static>> {
    let current = &view.config().id;
    let mut lines = vec![Line::default()];

    for (i, theme) in view.themes().iter().enumerate() {
        let is_current = &theme.id == current;
        let is_selected = i == picker.selected;

        let marker = if is_selected { "▸ " } else { "  " };
        let check = if is_current { " ✓" } else { "" };
        let name_style = if is_current { view.primary() } else { view.heading() };
        let row_style = if is_selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        // marker, swatch and check mark take two columns each
        let name_width = width.saturating_sub(6);
        lines.push(
            Line::from(vec![
                Span::styled(marker, view.accent()),
                Span::styled("● ", Style::default().fg(theme.colors.primary)),
                Span::styled(fit(&theme.name, name_width), name_style),
                Span::styled(check, view.primary()),
            ])
            .style(row_style),
        );
        lines.push(
            Line::from(Span::styled(format!("    {}", theme.layout.description()), view.muted()))
                .style(row_style),
        );
        lines.push(Line::default());
    }
    lines
}
