//! Storefront - a themed terminal storefront
//!
//! The active theme lives in a persisted, reactive store: selecting a theme
//! starts a short transition, and once it settles the choice is saved and
//! projected into the styles the UI draws with.

pub mod app;
pub mod config;
pub mod products;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::{ThemeCatalog, ThemeStore};
