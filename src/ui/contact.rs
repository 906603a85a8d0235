//! Contact page

use ratatui::text::{Line, Span};

use super::ThemeView;
use super::text::{fit, heading, paragraph};

const CHANNELS: [(&str, &str, &str); 4] = [
    ("Email Us", "hello@multitheme.com", "Get in touch via email"),
    ("Call Us", "+1 (555) 123-4567", "Monday to Friday, 9am-6pm EST"),
    ("Visit Us", "123 Commerce Street, Tech City", "Our headquarters"),
    ("Website", "www.multitheme.com", "Explore our work online"),
];

const HOURS: [(&str, &str); 3] = [
    ("Monday - Friday", "9:00 AM - 6:00 PM"),
    ("Saturday", "10:00 AM - 4:00 PM"),
    ("Sunday", "Closed"),
];

pub fn lines(view: &ThemeView, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    lines.extend(heading("Get In Touch", view.primary()));
    lines.extend(paragraph(
        "Have questions about our products or themes? Want to collaborate? We'd love to hear \
         from you. Reach out and let's create something amazing together.",
        width,
        view.muted(),
    ));
    lines.push(Line::default());

    for (title, value, description) in CHANNELS {
        lines.push(
            Line::from(vec![
                Span::styled(format!("{} ", fit(title, 9)), view.heading()),
                Span::styled(value, view.primary()),
            ])
            .centered(),
        );
        lines.push(Line::from(Span::styled(description, view.muted())).centered());
        lines.push(Line::default());
    }

    lines.extend(heading("Business Hours", view.heading()));
    for (days, hours) in HOURS {
        let style = if hours == "Closed" { view.accent() } else { view.secondary() };
        lines.push(
            Line::from(vec![
                Span::styled(fit(days, 18), view.muted()),
                Span::styled(fit(hours, 18), style),
            ])
            .centered(),
        );
    }
    lines.push(Line::default());

    lines.extend(heading("Quick Response", view.heading()));
    lines.extend(paragraph(
        "We typically respond to all inquiries within 24 hours during business days.",
        width,
        view.muted(),
    ));
    lines.push(Line::from(Span::styled("● Currently online", view.accent())).centered());
    lines.push(Line::default());
    lines
}
