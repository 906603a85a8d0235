//! Product cards and the grid that lays them out

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use textwrap::core::display_width;

use super::ThemeView;
use super::text::{fit, wrap};
use crate::products::Product;
use crate::theme::LayoutVariant;

/// Narrowest a card may get before the grid drops a column
pub const CARD_MIN_WIDTH: usize = 28;

/// Rows per card, borders included
pub const CARD_HEIGHT: usize = 11;

/// Columns between neighbouring cards
const GAP: usize = 2;

const TITLE_LINES: usize = 2;
const DESCRIPTION_LINES: usize = 3;

/// How many cards fit side by side
///
/// Each layout caps the column count: the minimalist layout shows three,
/// the sidebar layout two and the grid layout four.
pub fn columns_for(layout: LayoutVariant, width: usize) -> usize {
    let max = match layout {
        LayoutVariant::Default => 3,
        LayoutVariant::Sidebar => 2,
        LayoutVariant::Grid => 4,
    };
    let fit = (width + GAP) / (CARD_MIN_WIDTH + GAP);
    fit.clamp(1, max)
}

/// Render one card as exactly [`CARD_HEIGHT`] lines of `width` columns
pub fn card_lines(product: &Product, width: usize, view: &ThemeView) -> Vec<Line<'static>> {
    let width = width.max(6);
    let inner = width - 4;
    let border = view.border();

    let mut lines = Vec::with_capacity(CARD_HEIGHT);
    lines.push(Line::from(Span::styled(format!("╭{}╮", "─".repeat(width - 2)), border)));

    let mut rows: Vec<Vec<Span<'static>>> = Vec::with_capacity(CARD_HEIGHT - 2);
    rows.push(vec![Span::styled(product.category.to_uppercase(), view.accent())]);
    rows.extend(padded(wrap(&product.title, inner, TITLE_LINES), TITLE_LINES, view.heading()));
    rows.extend(padded(
        wrap(&product.description, inner, DESCRIPTION_LINES),
        DESCRIPTION_LINES,
        view.muted(),
    ));
    rows.push(vec![
        Span::styled(product.stars(), view.accent()),
        Span::styled(format!(" ({})", product.rating.count), view.muted()),
    ]);
    rows.push(vec![Span::styled(product.display_price(), view.primary())]);
    rows.push(vec![Span::styled(" Add to Cart ".to_string(), view.button())]);

    for spans in rows {
        lines.push(boxed(spans, inner, border));
    }

    lines.push(Line::from(Span::styled(format!("╰{}╯", "─".repeat(width - 2)), border)));
    lines
}

/// Lay cards out in rows, separated by a blank line
pub fn grid_lines(products: &[Product], width: usize, view: &ThemeView) -> Vec<Line<'static>> {
    let columns = columns_for(view.layout(), width);
    let card_width = ((width.saturating_sub(GAP * (columns - 1))) / columns).max(CARD_MIN_WIDTH);

    let mut lines = Vec::new();
    for (row, chunk) in products.chunks(columns).enumerate() {
        if row > 0 {
            lines.push(Line::default());
        }
        let cards: Vec<Vec<Line<'static>>> =
            chunk.iter().map(|product| card_lines(product, card_width, view)).collect();

        for i in 0..CARD_HEIGHT {
            let mut spans = Vec::new();
            for (col, card) in cards.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" ".repeat(GAP)));
                }
                spans.extend(card[i].spans.iter().cloned());
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

/// Wrapped text rows, padded with empty rows up to `count`
fn padded(lines: Vec<String>, count: usize, style: Style) -> Vec<Vec<Span<'static>>> {
    let mut rows: Vec<Vec<Span<'static>>> =
        lines.into_iter().map(|line| vec![Span::styled(line, style)]).collect();
    rows.resize_with(count, Vec::new);
    rows
}

/// Frame a row of spans with side borders, fitting it to `inner` columns
fn boxed(spans: Vec<Span<'static>>, inner: usize, border: Style) -> Line<'static> {
    let mut out = vec![Span::styled("│ ", border)];
    let mut remaining = inner;
    for span in spans {
        if remaining == 0 {
            break;
        }
        let text = if display_width(&span.content) <= remaining {
            span.content.into_owned()
        } else {
            fit(&span.content, remaining)
        };
        remaining -= display_width(&text);
        out.push(Span::styled(text, span.style));
    }
    out.push(Span::raw(" ".repeat(remaining)));
    out.push(Span::styled(" │", border));
    Line::from(out)
}
