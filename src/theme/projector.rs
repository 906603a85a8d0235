//! Mirrors the active theme into the shared render environment
//!
//! Widgets read colors from the [`RenderEnvironment`] rather than from the
//! store, so a committed theme reaches every screen on the next frame
//! without threading the configuration through each draw call.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::Arc;

use super::store::{SubscriptionId, ThemeSnapshot, ThemeStore};
use super::{ColorRole, FontRole, ThemeColors, ThemeConfig, css_color};

/// Global style state shared by all widgets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderEnvironment {
    /// Style variables such as `--color-primary`
    variables: BTreeMap<String, String>,
    /// Typed palette for terminal rendering
    colors: ThemeColors,
    /// Window title
    title: String,
}

impl RenderEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the variables as a `:root` stylesheet block
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push('}');
        css
    }
}

/// Style variable name for a color role
pub fn color_variable(role: ColorRole) -> String {
    format!("--color-{}", role.name())
}

/// Style variable name for a font role
pub fn font_variable(role: FontRole) -> String {
    format!("--font-{}", role.name())
}

/// Writes configurations into a [`RenderEnvironment`]
#[derive(Debug, Default)]
pub struct Projector {
    last: Option<Arc<ThemeConfig>>,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the snapshot's configuration if it changed since last time
    ///
    /// Returns whether the environment was written. Flag-only notifications
    /// carry the previous configuration and are skipped.
    pub fn project(&mut self, snapshot: &ThemeSnapshot, env: &mut RenderEnvironment) -> bool {
        let config = &snapshot.configuration;
        if self.last.as_ref().is_some_and(|last| Arc::ptr_eq(last, config)) {
            return false;
        }

        apply(config, env);
        self.last = Some(Arc::clone(config));
        tracing::debug!("Projected theme {} into render environment", config.id);
        true
    }

    /// Project the store's current configuration and follow every change
    pub fn attach(store: &mut ThemeStore, env: Rc<RefCell<RenderEnvironment>>) -> SubscriptionId {
        let mut projector = Self::new();
        projector.project(&store.snapshot(), &mut env.borrow_mut());

        store.subscribe(move |snapshot| {
            projector.project(snapshot, &mut env.borrow_mut());
        })
    }
}

/// Write every variable of a configuration into the environment
fn apply(config: &ThemeConfig, env: &mut RenderEnvironment) {
    for role in ColorRole::ALL {
        env.set_variable(color_variable(role), css_color(config.colors.get(role)));
    }
    for role in FontRole::ALL {
        env.set_variable(font_variable(role), config.fonts.get(role));
    }
    env.colors = config.colors.clone();
    env.title = config.title();
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::theme::ThemeCatalog;

    fn snapshot(catalog: &ThemeCatalog, id: &str, is_transitioning: bool) -> ThemeSnapshot {
        ThemeSnapshot { configuration: catalog.get(id).unwrap(), is_transitioning }
    }

    #[test]
    fn projects_all_roles_and_title() {
        let catalog = ThemeCatalog::builtin();
        let mut env = RenderEnvironment::new();
        let mut projector = Projector::new();

        assert!(projector.project(&snapshot(&catalog, "theme2", false), &mut env));

        assert_eq!(env.variables().len(), ColorRole::ALL.len() + FontRole::ALL.len());
        assert_eq!(env.variable("--color-primary"), Some("#fbbf24"));
        assert_eq!(env.variable("--color-textSecondary"), Some("#94a3b8"));
        assert_eq!(env.variable("--font-primary"), Some(r#"Georgia, "Times New Roman", Times, serif"#));
        assert_eq!(env.title(), "MultiTheme Store - Dark");
        assert_eq!(env.colors(), &catalog.get("theme2").unwrap().colors);
    }

    #[test]
    fn same_configuration_is_not_reprojected() {
        let catalog = ThemeCatalog::builtin();
        let mut env = RenderEnvironment::new();
        let mut projector = Projector::new();

        assert!(projector.project(&snapshot(&catalog, "theme1", false), &mut env));
        let before = env.clone();
        assert!(!projector.project(&snapshot(&catalog, "theme1", true), &mut env));
        assert_eq!(env, before);
    }

    #[test]
    fn projection_is_idempotent() {
        let catalog = ThemeCatalog::builtin();
        let mut once = RenderEnvironment::new();
        let mut twice = RenderEnvironment::new();

        Projector::new().project(&snapshot(&catalog, "theme3", false), &mut once);
        Projector::new().project(&snapshot(&catalog, "theme3", false), &mut twice);
        Projector::new().project(&snapshot(&catalog, "theme3", false), &mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn attach_follows_commits_but_not_transition_start() {
        let catalog = Arc::new(ThemeCatalog::builtin());
        let mut store = ThemeStore::new(catalog, None, Duration::from_millis(150));
        let env = Rc::new(RefCell::new(RenderEnvironment::new()));
        Projector::attach(&mut store, Rc::clone(&env));
        assert_eq!(env.borrow().title(), "MultiTheme Store - Default");

        let t0 = Instant::now();
        store.request_theme_at("theme3", t0).unwrap();
        assert_eq!(env.borrow().variable("--color-primary"), Some("#2563eb"));

        store.poll(t0 + Duration::from_millis(150));
        assert_eq!(env.borrow().variable("--color-primary"), Some("#ec4899"));
        assert_eq!(env.borrow().variable("--font-primary"), Some(r#""Pacifico", cursive"#));
        assert_eq!(env.borrow().title(), "MultiTheme Store - Colorful");
    }

    #[test]
    fn css_lists_variables_in_order() {
        let catalog = ThemeCatalog::builtin();
        let mut env = RenderEnvironment::new();
        Projector::new().project(&snapshot(&catalog, "theme1", false), &mut env);

        let css = env.to_css();
        assert!(css.starts_with(":root {\n  --color-accent: #3b82f6;\n"));
        assert!(css.ends_with('}'));
    }
}
