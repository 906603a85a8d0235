//! Themes shipped with the storefront

use ratatui::style::Color;

use super::{LayoutVariant, ThemeColors, ThemeConfig, ThemeFonts, ThemeId};

const SYSTEM_SANS: &str = r#"-apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif"#;
const GEORGIA_SERIF: &str = r#"Georgia, "Times New Roman", Times, serif"#;

/// Built-in themes in declaration order; the first one is the default
pub fn themes() -> Vec<ThemeConfig> {
    vec![default_theme(), dark_theme(), colorful_theme()]
}

/// Clean light theme with the minimalist layout
fn default_theme() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::from("theme1"),
        name: "Default".to_string(),
        colors: ThemeColors {
            primary: Color::Rgb(37, 99, 235),          // #2563eb
            secondary: Color::Rgb(100, 116, 139),      // #64748b
            background: Color::Rgb(255, 255, 255),     // #ffffff
            surface: Color::Rgb(248, 250, 252),        // #f8fafc
            text: Color::Rgb(30, 41, 59),              // #1e293b
            text_secondary: Color::Rgb(100, 116, 139), // #64748b
            accent: Color::Rgb(59, 130, 246),          // #3b82f6
            border: Color::Rgb(226, 232, 240),         // #e2e8f0
        },
        fonts: ThemeFonts { primary: SYSTEM_SANS.to_string(), secondary: SYSTEM_SANS.to_string() },
        layout: LayoutVariant::Default,
    }
}

/// Dark amber theme with the navigation sidebar
fn dark_theme() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::from("theme2"),
        name: "Dark".to_string(),
        colors: ThemeColors {
            primary: Color::Rgb(251, 191, 36),         // #fbbf24
            secondary: Color::Rgb(156, 163, 175),      // #9ca3af
            background: Color::Rgb(15, 23, 42),        // #0f172a
            surface: Color::Rgb(30, 41, 59),           // #1e293b
            text: Color::Rgb(241, 245, 249),           // #f1f5f9
            text_secondary: Color::Rgb(148, 163, 184), // #94a3b8
            accent: Color::Rgb(245, 158, 11),          // #f59e0b
            border: Color::Rgb(51, 65, 85),            // #334155
        },
        fonts: ThemeFonts {
            primary: GEORGIA_SERIF.to_string(),
            secondary: GEORGIA_SERIF.to_string(),
        },
        layout: LayoutVariant::Sidebar,
    }
}

/// Playful theme with the wide product grid
fn colorful_theme() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::from("theme3"),
        name: "Colorful".to_string(),
        colors: ThemeColors {
            primary: Color::Rgb(236, 72, 153),         // #ec4899
            secondary: Color::Rgb(139, 92, 246),       // #8b5cf6
            background: Color::Rgb(254, 247, 237),     // #fef7ed
            surface: Color::Rgb(255, 255, 255),        // #ffffff
            text: Color::Rgb(55, 65, 81),              // #374151
            text_secondary: Color::Rgb(107, 114, 128), // #6b7280
            accent: Color::Rgb(16, 185, 129),          // #10b981
            border: Color::Rgb(243, 232, 255),         // #f3e8ff
        },
        fonts: ThemeFonts {
            primary: r#""Pacifico", cursive"#.to_string(),
            secondary: r#""Inter", sans-serif"#.to_string(),
        },
        layout: LayoutVariant::Grid,
    }
}
