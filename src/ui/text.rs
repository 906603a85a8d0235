//! Text shaping helpers shared by the page renderers

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use textwrap::core::display_width;

/// Widest a block of prose gets, regardless of the terminal width
pub const PROSE_MAX_WIDTH: usize = 72;

/// Fit `text` into exactly `width` columns, truncating with an ellipsis
pub fn fit(text: &str, width: usize) -> String {
    let used = display_width(text);
    if used <= width {
        return format!("{}{}", text, " ".repeat(width - used));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut taken = 0;
    for ch in text.chars() {
        let w = display_width(ch.encode_utf8(&mut [0; 4]));
        if taken + w > width - 1 {
            break;
        }
        out.push(ch);
        taken += w;
    }
    out.push('…');
    out.push_str(&" ".repeat(width - 1 - taken));
    out
}

/// Wrap `text` to `width` columns, keeping at most `max_lines` lines
///
/// The last kept line ends in an ellipsis when text was dropped.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> =
        textwrap::wrap(text, width).into_iter().map(|line| line.into_owned()).collect();

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let trimmed = fit(last, width.saturating_sub(1));
            *last = format!("{}…", trimmed.trim_end());
        }
    }
    lines
}

/// Total display width of a line's spans
pub fn line_width(line: &Line) -> usize {
    line.spans.iter().map(|span| display_width(&span.content)).sum()
}

/// A wrapped, centered paragraph
pub fn paragraph(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    textwrap::wrap(text, width.min(PROSE_MAX_WIDTH).max(1))
        .into_iter()
        .map(|line| Line::from(Span::styled(line.into_owned(), style)).centered())
        .collect()
}

/// A centered section heading followed by a blank line
pub fn heading(text: &str, style: Style) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(text.to_string(), style)).centered(), Line::default()]
}
