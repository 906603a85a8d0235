//! Theming system for the storefront
//!
//! A theme is an immutable [`ThemeConfig`] looked up by [`ThemeId`] in a
//! [`ThemeCatalog`]. The [`ThemeStore`] owns the selected id, persists it and
//! notifies subscribers; the [`Projector`] mirrors the active configuration
//! into the shared [`RenderEnvironment`].

mod builtin;
pub mod catalog;
pub mod projector;
pub mod store;

pub use catalog::{CatalogError, ThemeCatalog};
pub use projector::{Projector, RenderEnvironment};
pub use store::{RequestOutcome, SubscriptionId, ThemeSnapshot, ThemeState, ThemeStore};

use std::fmt;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key under which the selected theme id is persisted
pub const THEME_STORAGE_KEY: &str = "app-theme";

/// Prefix for the window title set by the projector
pub const TITLE_PREFIX: &str = "MultiTheme Store";

/// Errors raised by theme lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// The identifier is not a key of the catalog
    #[error("Unknown theme: {0}")]
    UnknownTheme(ThemeId),
}

/// Opaque identifier selecting one configuration from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ThemeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Semantic color roles every theme must define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Primary,
    Secondary,
    Background,
    Surface,
    Text,
    TextSecondary,
    Accent,
    Border,
}

impl ColorRole {
    /// All roles in declaration order
    pub const ALL: [ColorRole; 8] = [
        Self::Primary,
        Self::Secondary,
        Self::Background,
        Self::Surface,
        Self::Text,
        Self::TextSecondary,
        Self::Accent,
        Self::Border,
    ];

    /// Role name as used in style variables
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::TextSecondary => "textSecondary",
            Self::Accent => "accent",
            Self::Border => "border",
        }
    }
}

/// Font roles every theme must define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Primary,
    Secondary,
}

impl FontRole {
    pub const ALL: [FontRole; 2] = [Self::Primary, Self::Secondary];

    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// Color palette of a theme, one color per [`ColorRole`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub border: Color,
}

impl ThemeColors {
    /// Look up the color assigned to a role
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Text => self.text,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Border => self.border,
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            background: Color::Reset,
            surface: Color::Reset,
            text: Color::Reset,
            text_secondary: Color::Reset,
            accent: Color::Reset,
            border: Color::Reset,
        }
    }
}

/// Font families of a theme, one per [`FontRole`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub primary: String,
    pub secondary: String,
}

impl ThemeFonts {
    pub fn get(&self, role: FontRole) -> &str {
        match role {
            FontRole::Primary => &self.primary,
            FontRole::Secondary => &self.secondary,
        }
    }
}

/// Page layout variant selected by a theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    #[default]
    Default,
    Sidebar,
    Grid,
}

impl LayoutVariant {
    /// Short description shown in the theme picker
    pub fn description(self) -> &'static str {
        match self {
            Self::Default => "Minimalist Layout",
            Self::Sidebar => "Dark Sidebar Layout",
            Self::Grid => "Colorful Grid Layout",
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Sidebar => "sidebar",
            Self::Grid => "grid",
        };
        f.write_str(name)
    }
}

/// A complete, immutable theme configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub id: ThemeId,
    pub name: String,
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub layout: LayoutVariant,
}

impl ThemeConfig {
    /// Window title embedding the theme's display name
    pub fn title(&self) -> String {
        format!("{} - {}", TITLE_PREFIX, self.name)
    }
}

/// xterm's default values for the 16 basic terminal colors
const ANSI_PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0xcd, 0x00, 0x00),
    (0x00, 0xcd, 0x00),
    (0xcd, 0xcd, 0x00),
    (0x00, 0x00, 0xee),
    (0xcd, 0x00, 0xcd),
    (0x00, 0xcd, 0xcd),
    (0xe5, 0xe5, 0xe5),
    (0x7f, 0x7f, 0x7f),
    (0xff, 0x00, 0x00),
    (0x00, 0xff, 0x00),
    (0xff, 0xff, 0x00),
    (0x5c, 0x5c, 0xff),
    (0xff, 0x00, 0xff),
    (0x00, 0xff, 0xff),
    (0xff, 0xff, 0xff),
];

/// RGB value of an entry in the 256-color palette
fn indexed_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI_PALETTE[index as usize],
        // 6x6x6 color cube
        16..=231 => {
            let i = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        // grayscale ramp
        _ => {
            let v = 8 + (index - 232) * 10;
            (v, v, v)
        }
    }
}

/// Render a color the way a stylesheet would spell it
///
/// Named and indexed terminal colors resolve through the xterm palette;
/// `Reset` means "whatever the surroundings use".
pub fn css_color(color: Color) -> String {
    let (r, g, b) = match color {
        Color::Reset => return "inherit".to_string(),
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(index) => indexed_rgb(index),
        Color::Black => indexed_rgb(0),
        Color::Red => indexed_rgb(1),
        Color::Green => indexed_rgb(2),
        Color::Yellow => indexed_rgb(3),
        Color::Blue => indexed_rgb(4),
        Color::Magenta => indexed_rgb(5),
        Color::Cyan => indexed_rgb(6),
        Color::Gray => indexed_rgb(7),
        Color::DarkGray => indexed_rgb(8),
        Color::LightRed => indexed_rgb(9),
        Color::LightGreen => indexed_rgb(10),
        Color::LightYellow => indexed_rgb(11),
        Color::LightBlue => indexed_rgb(12),
        Color::LightMagenta => indexed_rgb(13),
        Color::LightCyan => indexed_rgb(14),
        Color::White => indexed_rgb(15),
    };
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
