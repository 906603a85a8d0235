//! Home page: hero, features, featured products and call to action

use ratatui::text::{Line, Span};

use super::ThemeView;
use super::product_card::grid_lines;
use super::text::{heading, paragraph};
use crate::app::state::AppState;
use crate::products::FetchState;
use crate::theme::LayoutVariant;

const FEATURES: [(&str, &str); 4] = [
    ("Quality Products", "Curated selection of premium items from trusted brands worldwide."),
    ("Top Rated", "All products are highly rated by our community of satisfied customers."),
    ("Trending Now", "Stay ahead with the latest trends and most popular items."),
    ("Secure Shopping", "Shop with confidence using our secure payment and delivery system."),
];

/// Build the page content for a given width
pub fn lines(state: &AppState, view: &ThemeView, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    hero(&mut lines, view, width);
    features(&mut lines, view, width);
    products(&mut lines, state, view, width);
    call_to_action(&mut lines, view, width);
    lines
}

fn hero(lines: &mut Vec<Line<'static>>, view: &ThemeView, width: usize) {
    let (open, close) = match view.layout() {
        LayoutVariant::Grid => ("✦ ", " ✦"),
        _ => ("", ""),
    };

    lines.push(Line::default());
    lines.push(
        Line::from(vec![
            Span::styled(format!("{open}Welcome to "), view.heading()),
            Span::styled(format!("MultiTheme Store{close}"), view.primary()),
        ])
        .centered(),
    );
    lines.push(Line::default());
    lines.extend(paragraph(
        "Discover amazing products with our dynamic theme switcher. Experience how each \
         theme transforms the entire shopping experience.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());
    lines.push(
        Line::from(vec![
            Span::styled(" Shop Now ", view.button()),
            Span::raw("   "),
            Span::styled(" Learn More ", view.outline_button()),
        ])
        .centered(),
    );
    lines.push(Line::default());
}

fn features(lines: &mut Vec<Line<'static>>, view: &ThemeView, width: usize) {
    lines.extend(heading("Why Choose Us", view.heading()));

    let bullet = match view.layout() {
        LayoutVariant::Grid => "✦",
        LayoutVariant::Sidebar => "▸",
        LayoutVariant::Default => "◆",
    };
    for (title, description) in FEATURES {
        lines.push(
            Line::from(vec![
                Span::styled(format!("{bullet} "), view.accent()),
                Span::styled(title, view.heading()),
            ])
            .centered(),
        );
        lines.extend(paragraph(description, width, view.muted()));
        lines.push(Line::default());
    }
}

fn products(lines: &mut Vec<Line<'static>>, state: &AppState, view: &ThemeView, width: usize) {
    lines.extend(heading("Featured Products", view.heading()));

    match &state.products {
        FetchState::Loading => {
            lines.push(Line::from(Span::styled("Loading products...", view.muted())).centered());
        }
        FetchState::Failed(message) => {
            lines.push(
                Line::from(Span::styled(
                    format!("Error loading products: {message}"),
                    view.accent(),
                ))
                .centered(),
            );
            lines.push(Line::default());
            let hint = if state.products_retryable {
                Line::from(vec![
                    Span::styled(" Retry ", view.button()),
                    Span::styled("  press r", view.muted()),
                ])
            } else {
                Line::from(Span::styled("Check product_api_url in config.json", view.muted()))
            };
            lines.push(hint.centered());
        }
        FetchState::Loaded(products) if products.is_empty() => {
            lines.push(Line::from(Span::styled("No products available", view.muted())).centered());
        }
        FetchState::Loaded(products) => {
            lines.extend(grid_lines(products, width, view));
        }
    }
    lines.push(Line::default());
}

fn call_to_action(lines: &mut Vec<Line<'static>>, view: &ThemeView, width: usize) {
    lines.extend(heading("Ready to Start Shopping?", view.heading()));
    lines.extend(paragraph(
        "Explore our full catalog and experience the power of dynamic theming.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(" Browse All Products ", view.button())).centered());
    lines.push(Line::default());
}
