//! About page

use ratatui::text::{Line, Span};

use super::ThemeView;
use super::text::{heading, paragraph};
use crate::theme::LayoutVariant;

const STATS: [(&str, &str); 4] = [
    ("10K+", "Happy Customers"),
    ("50K+", "Products Sold"),
    ("25+", "Countries Served"),
    ("5+", "Years Experience"),
];

const VALUES: [(&str, &str); 4] = [
    ("Customer First", "We put our customers at the heart of everything we do."),
    ("Innovation", "Constantly evolving to bring you the latest and greatest."),
    ("Trust & Security", "Your data and transactions are always safe with us."),
    ("Fast Delivery", "Quick and reliable shipping to get your orders to you fast."),
];

const TEAM: [(&str, &str, &str); 3] = [
    (
        "Sarah Johnson",
        "CEO & Founder",
        "Visionary leader with 10+ years in e-commerce and retail innovation.",
    ),
    ("Mike Chen", "CTO", "Tech expert passionate about creating seamless shopping experiences."),
    (
        "Emily Rodriguez",
        "Head of Design",
        "Creative designer focused on beautiful and intuitive user interfaces.",
    ),
];

pub fn lines(view: &ThemeView, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    lines.extend(heading("About Our Store", view.primary()));
    lines.extend(paragraph(
        "We're passionate about bringing you the best shopping experience through innovative \
         design and cutting-edge technology. Our multi-theme system demonstrates our \
         commitment to user experience excellence.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());

    // Stats share one row when there is room, otherwise stack
    let stat_spans: Vec<Vec<Span<'static>>> = STATS
        .iter()
        .map(|(value, label)| {
            vec![
                Span::styled(value.to_string(), view.primary()),
                Span::styled(format!(" {label}"), view.muted()),
            ]
        })
        .collect();
    if width >= 90 {
        let mut row = Vec::new();
        for (i, spans) in stat_spans.into_iter().enumerate() {
            if i > 0 {
                row.push(Span::styled("  │  ", view.border()));
            }
            row.extend(spans);
        }
        lines.push(Line::from(row).centered());
    } else {
        lines.extend(stat_spans.into_iter().map(|spans| Line::from(spans).centered()));
    }
    lines.push(Line::default());

    lines.extend(heading("Our Mission", view.heading()));
    lines.extend(paragraph(
        "At MultiTheme Store, we believe that great shopping experiences should be \
         accessible, beautiful, and delightful. Our mission is to revolutionize e-commerce \
         through innovative design and user-centric technology.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());
    lines.extend(paragraph(
        "Through our dynamic theme system, we demonstrate how a single platform can adapt \
         to different preferences and contexts while maintaining exceptional functionality \
         and aesthetics.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());

    lines.extend(heading("Our Values", view.heading()));
    let bullet = if view.layout() == LayoutVariant::Grid { "✦" } else { "•" };
    for (title, description) in VALUES {
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

    lines.extend(heading("Meet Our Team", view.heading()));
    for (name, role, bio) in TEAM {
        lines.push(Line::from(Span::styled(name, view.heading())).centered());
        lines.push(Line::from(Span::styled(role, view.accent())).centered());
        lines.extend(paragraph(bio, width, view.muted()));
        lines.push(Line::default());
    }

    lines.extend(heading("Join Our Journey", view.heading()));
    lines.extend(paragraph(
        "Be part of the future of e-commerce. Experience the power of adaptive design and \
         help us shape the next generation of online shopping.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(" Get Started Today ", view.button())).centered());
    lines.push(Line::default());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::themed;

    fn rows(width: usize) -> Vec<String> {
        let (store, env) = themed("theme1");
        let env = env.borrow();
        let view = ThemeView::new(&env, &store);
        lines(&view, width)
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn wide_page_puts_stats_on_one_row() {
        let rows = rows(120);
        assert!(rows.iter().any(|row| row.contains("10K+ Happy Customers")
            && row.contains("5+ Years Experience")));
    }

    #[test]
    fn narrow_page_stacks_stats() {
        let rows = rows(60);
        assert!(rows.iter().any(|row| row == "50K+ Products Sold"));
    }

    #[test]
    fn team_members_are_listed() {
        let rows = rows(100);
        for name in ["Sarah Johnson", "Mike Chen", "Emily Rodriguez"] {
            assert!(rows.iter().any(|row| row == name), "missing {name}");
        }
    }
}
