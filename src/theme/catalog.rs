//! Immutable mapping from theme id to configuration

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use super::{ThemeConfig, ThemeError, ThemeId, builtin};

/// Errors raised while building a catalog from external data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A catalog needs at least one theme to have a default
    #[error("Theme catalog is empty")]
    Empty,

    /// Two entries share the same id
    #[error("Duplicate theme id: {0}")]
    DuplicateId(ThemeId),

    /// Failed to read the catalog file
    #[error("Failed to read theme catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog JSON is malformed or a theme is incomplete
    #[error("Failed to parse theme catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Themes available to the store, in declaration order
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Arc<ThemeConfig>>,
}

impl ThemeCatalog {
    /// Build a catalog, rejecting empty lists and duplicate ids
    pub fn new(themes: Vec<ThemeConfig>) -> Result<Self, CatalogError> {
        if themes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for theme in &themes {
            if !seen.insert(theme.id.clone()) {
                return Err(CatalogError::DuplicateId(theme.id.clone()));
            }
        }

        Ok(Self { themes: themes.into_iter().map(Arc::new).collect() })
    }

    /// The three themes shipped with the storefront
    pub fn builtin() -> Self {
        Self { themes: builtin::themes().into_iter().map(Arc::new).collect() }
    }

    /// Parse a JSON array of theme configurations
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let themes: Vec<ThemeConfig> = serde_json::from_str(json)?;
        Self::new(themes)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Look up a configuration by id
    pub fn get(&self, id: &str) -> Result<Arc<ThemeConfig>, ThemeError> {
        self.themes
            .iter()
            .find(|theme| theme.id.as_str() == id)
            .cloned()
            .ok_or_else(|| ThemeError::UnknownTheme(ThemeId::from(id)))
    }

    /// Whether the id is a key of this catalog
    pub fn contains(&self, id: &str) -> bool {
        self.themes.iter().any(|theme| theme.id.as_str() == id)
    }

    /// All configurations in declaration order
    pub fn list(&self) -> &[Arc<ThemeConfig>] {
        &self.themes
    }

    /// The first-declared theme
    pub fn default_id(&self) -> &ThemeId {
        &self.themes[0].id
    }

    /// Configuration of the first-declared theme
    pub fn default_config(&self) -> Arc<ThemeConfig> {
        Arc::clone(&self.themes[0])
    }

    /// Position of a theme in declaration order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
