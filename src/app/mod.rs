//! Application state and event handling

pub mod input;
pub mod state;

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::products::{FetchError, FetchState, Product, ProductClient};
use crate::storage::{FileStorage, Storage};
use crate::theme::{Projector, RenderEnvironment, ThemeCatalog, ThemeStore};
use crate::ui::{self, ThemeView};
use input::Action;
use state::{AppState, Page};

/// Longest wait for input between frames
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Load the configured theme catalog, falling back to the built-in themes
pub fn load_catalog(config: &Config) -> ThemeCatalog {
    match &config.themes_file {
        Some(path) => ThemeCatalog::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load themes from {:?}: {}; using built-in themes", path, e);
            ThemeCatalog::builtin()
        }),
        None => ThemeCatalog::builtin(),
    }
}

/// Open the on-disk key-value storage, if a data directory exists
pub fn open_storage(config: &Config) -> Option<Arc<dyn Storage>> {
    match Config::storage_path() {
        Ok(path) => {
            let mut storage = FileStorage::new(path);
            if let Some(quota) = config.storage_quota_bytes {
                storage = storage.with_quota(quota);
            }
            Some(Arc::new(storage))
        }
        Err(e) => {
            tracing::warn!("{}; theme selection will not persist", e);
            None
        }
    }
}

/// Build the theme store described by the configuration
pub fn open_theme_store(config: &Config) -> ThemeStore {
    ThemeStore::new(Arc::new(load_catalog(config)), open_storage(config), config.settle_interval())
}

/// A finished product fetch, tagged with the request it answers
struct FetchCompletion {
    generation: u64,
    result: Result<Vec<Product>, FetchError>,
}

/// Storefront logic, independent of the terminal
pub struct Storefront {
    /// Current application state
    state: AppState,
    /// Selected theme
    store: ThemeStore,
    /// Styles projected from the active theme
    env: Rc<RefCell<RenderEnvironment>>,
    /// Product endpoint client
    client: ProductClient,
    fetch_tx: mpsc::UnboundedSender<FetchCompletion>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    /// Generation of the fetch the home page is waiting for
    fetch_generation: u64,
    /// Cancels in-flight fetches on exit
    cancel_token: CancellationToken,
}

impl Storefront {
    /// Wire the projector to the store and set up the fetch channel
    pub fn new(mut store: ThemeStore, client: ProductClient) -> Self {
        let env = Rc::new(RefCell::new(RenderEnvironment::new()));
        Projector::attach(&mut store, Rc::clone(&env));
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::default(),
            store,
            env,
            client,
            fetch_tx,
            fetch_rx,
            fetch_generation: 0,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// Window title set by the projector
    pub fn title(&self) -> String {
        self.env.borrow().title().to_string()
    }

    /// Mount the initial page
    pub fn start(&mut self) {
        if self.state.page == Page::Home {
            self.start_fetch();
        }
    }

    /// Commit due theme transitions and apply finished fetches
    pub fn tick(&mut self, now: Instant) {
        self.store.poll(now);
        self.drain_fetches();
    }

    /// How long the loop may wait for input before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.store.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(FRAME_INTERVAL),
            None => FRAME_INTERVAL,
        }
    }

    /// Translate a key press according to the current mode
    pub fn key_to_action(&self, key: KeyEvent) -> Option<Action> {
        if self.state.picker.open {
            input::picker_key_to_action(key.code)
        } else {
            input::page_key_to_action(key.code, key.modifiers)
        }
    }

    /// Apply an action, returns true if should exit
    pub fn handle_action(&mut self, action: Action, now: Instant) -> bool {
        if self.state.picker.open {
            let len = self.store.catalog().len();
            match action {
                Action::PickerUp => self.state.picker.select_prev(len),
                Action::PickerDown => self.state.picker.select_next(len),
                Action::ApplyTheme => self.apply_selected_theme(now),
                Action::ClosePicker => self.state.picker.close(),
                Action::Quit => return true,
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::NextPage => self.navigate(self.state.page.next()),
            Action::PrevPage => self.navigate(self.state.page.prev()),
            Action::GoTo(page) => self.navigate(page),
            Action::ScrollDown => self.state.scroll_down(),
            Action::ScrollUp => self.state.scroll_up(),
            Action::ScrollTop => self.state.scroll_to_top(),
            Action::OpenThemePicker => {
                let index = self.store.catalog().position(self.store.current_id().as_str());
                self.state.picker.open_at(index.unwrap_or(0));
            }
            Action::Retry => {
                if self.state.page == Page::Home {
                    self.start_fetch();
                }
            }
            _ => {}
        }
        false
    }

    /// Render the current state
    pub fn draw(&self, frame: &mut Frame) {
        let env = self.env.borrow();
        let view = ThemeView::new(&env, &self.store);
        ui::draw(frame, &self.state, &view);
    }

    /// Tear down: cancel fetches and any pending theme commit
    pub fn shutdown(&mut self) {
        self.cancel_token.cancel();
        self.store.cancel_pending();
    }

    fn navigate(&mut self, page: Page) {
        if page == self.state.page {
            return;
        }

        if self.state.page == Page::Home {
            // The home page no longer waits for its fetch
            self.fetch_generation = self.fetch_generation.wrapping_add(1);
        }

        self.state.page = page;
        self.state.scroll_to_top();
        self.state.status = None;

        if page == Page::Home {
            self.start_fetch();
        }
    }

    fn apply_selected_theme(&mut self, now: Instant) {
        self.state.picker.close();
        let Some(config) = self.store.catalog().list().get(self.state.picker.selected).cloned()
        else {
            return;
        };

        match self.store.request_theme_at(config.id.as_str(), now) {
            Ok(outcome) => {
                tracing::debug!(theme = %config.id, ?outcome, "Theme requested");
                self.state.status = Some(format!("Theme: {}", config.name));
            }
            Err(e) => {
                tracing::warn!("Theme request failed: {}", e);
                self.state.status = Some(e.to_string());
            }
        }
    }

    /// Start a product fetch for the home page
    fn start_fetch(&mut self) {
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.state.products = FetchState::Loading;

        let generation = self.fetch_generation;
        let client = self.client.clone();
        let tx = self.fetch_tx.clone();
        let cancel_token = self.cancel_token.child_token();

        tokio::spawn(async move {
            let result = client.fetch_until_cancelled(cancel_token).await;
            if matches!(result, Err(FetchError::Cancelled)) {
                return;
            }
            // Receiver gone means the app already exited
            let _ = tx.send(FetchCompletion { generation, result });
        });
    }

    fn drain_fetches(&mut self) {
        while let Ok(done) = self.fetch_rx.try_recv() {
            if done.generation != self.fetch_generation {
                tracing::debug!("Ignoring stale product fetch {}", done.generation);
                continue;
            }

            match &done.result {
                Ok(products) => tracing::info!("Loaded {} products", products.len()),
                Err(e) => tracing::warn!("Product fetch failed: {}", e),
            }
            self.state.products_retryable =
                done.result.as_ref().err().is_some_and(FetchError::is_recoverable);
            self.state.products = done.result.into();
        }
    }
}

/// The main application
pub struct App {
    /// Storefront logic and state
    storefront: Storefront,

    /// Title last written to the terminal
    applied_title: String,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let store = open_theme_store(&config);
        let client = ProductClient::new(&config.product_api_url)
            .context("Failed to create product client")?;
        let storefront = Storefront::new(store, client);
        let terminal = Self::setup_terminal()?;

        Ok(Self { storefront, applied_title: String::new(), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Push the projected title to the terminal when it changes
    fn sync_title(&mut self) -> Result<()> {
        let title = self.storefront.title();
        if title != self.applied_title {
            execute!(self.terminal.backend_mut(), SetTitle(&title))?;
            self.applied_title = title;
        }
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.storefront.start();

        loop {
            self.storefront.tick(Instant::now());
            self.sync_title()?;

            // Draw UI
            self.terminal.draw(|frame| self.storefront.draw(frame))?;

            // Handle events
            if event::poll(self.storefront.poll_timeout(Instant::now()))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = self.storefront.key_to_action(key) {
                            if self.storefront.handle_action(action, Instant::now()) {
                                break;
                            }
                        }
                    }
                }
            }

            // Let finished fetches hand over their results
            tokio::task::yield_now().await;
        }

        self.storefront.shutdown();
        self.restore_terminal()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::products::Rating;
    use crate::storage::MemoryStorage;
    use crate::theme::store::DEFAULT_SETTLE_INTERVAL;

    fn storefront() -> Storefront {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store = ThemeStore::new(
            Arc::new(ThemeCatalog::builtin()),
            Some(storage),
            DEFAULT_SETTLE_INTERVAL,
        );
        let client = ProductClient::new("http://127.0.0.1:9/products").unwrap();
        let mut storefront = Storefront::new(store, client);
        // Spawned fetches exit at once; tests deliver results by hand
        storefront.cancel_token.cancel();
        storefront
    }

    fn complete(storefront: &Storefront, generation: u64, result: Result<Vec<Product>, FetchError>) {
        storefront.fetch_tx.send(FetchCompletion { generation, result }).unwrap();
    }

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price: 10.0,
            description: "A product".into(),
            category: "misc".into(),
            image: String::new(),
            rating: Rating { rate: 4.0, count: 3 },
        }
    }

    #[tokio::test]
    async fn picker_applies_theme_after_settle() {
        let mut storefront = storefront();
        let t0 = Instant::now();
        assert_eq!(storefront.title(), "MultiTheme Store - Default");

        storefront.handle_action(Action::OpenThemePicker, t0);
        assert!(storefront.state().picker.open);
        assert_eq!(storefront.state().picker.selected, 0);

        storefront.handle_action(Action::PickerDown, t0);
        storefront.handle_action(Action::ApplyTheme, t0);
        assert!(!storefront.state().picker.open);
        assert!(storefront.store().is_transitioning());
        assert_eq!(storefront.title(), "MultiTheme Store - Default");

        storefront.tick(t0 + DEFAULT_SETTLE_INTERVAL);
        assert!(!storefront.store().is_transitioning());
        assert_eq!(storefront.title(), "MultiTheme Store - Dark");
    }

    #[tokio::test]
    async fn picker_opens_on_current_theme() {
        let mut storefront = storefront();
        let t0 = Instant::now();
        storefront.store.request_theme_at("theme3", t0).unwrap();
        storefront.tick(t0 + DEFAULT_SETTLE_INTERVAL);

        storefront.handle_action(Action::OpenThemePicker, t0);
        assert_eq!(storefront.state().picker.selected, 2);
    }

    #[tokio::test]
    async fn home_fetch_result_is_applied() {
        let mut storefront = storefront();
        storefront.start();
        assert!(storefront.state().products.is_loading());

        complete(&storefront, storefront.fetch_generation, Ok(vec![product(1), product(2)]));
        storefront.tick(Instant::now());
        assert_eq!(storefront.state().products.data().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn leaving_home_ignores_stale_fetch() {
        let mut storefront = storefront();
        let now = Instant::now();
        storefront.start();
        let first = storefront.fetch_generation;

        storefront.handle_action(Action::GoTo(Page::About), now);
        complete(&storefront, first, Ok(vec![product(1)]));
        storefront.tick(now);
        assert!(storefront.state().products.is_loading());

        storefront.handle_action(Action::GoTo(Page::Home), now);
        complete(&storefront, first, Ok(vec![product(1)]));
        complete(&storefront, storefront.fetch_generation, Ok(vec![product(2)]));
        storefront.tick(now);

        let products = storefront.state().products.data().unwrap();
        assert_eq!(products[0].id, 2);
    }

    #[tokio::test]
    async fn failed_fetch_can_be_retried() {
        let mut storefront = storefront();
        let now = Instant::now();
        storefront.start();

        complete(&storefront, storefront.fetch_generation, Err(FetchError::Http { status: 500 }));
        storefront.tick(now);
        assert_eq!(storefront.state().products.error(), Some("HTTP error! status: 500"));
        assert!(storefront.state().products_retryable);

        storefront.handle_action(Action::Retry, now);
        assert!(storefront.state().products.is_loading());
    }

    #[tokio::test]
    async fn client_error_is_not_marked_retryable() {
        let mut storefront = storefront();
        storefront.start();

        complete(&storefront, storefront.fetch_generation, Err(FetchError::Http { status: 404 }));
        storefront.tick(Instant::now());
        assert_eq!(storefront.state().products.error(), Some("HTTP error! status: 404"));
        assert!(!storefront.state().products_retryable);
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_theme() {
        let mut storefront = storefront();
        let t0 = Instant::now();
        storefront.handle_action(Action::OpenThemePicker, t0);
        storefront.handle_action(Action::PickerUp, t0);
        storefront.handle_action(Action::ApplyTheme, t0);
        assert!(storefront.store().is_transitioning());

        storefront.shutdown();
        storefront.tick(t0 + DEFAULT_SETTLE_INTERVAL);
        assert_eq!(storefront.store().current_id().as_str(), "theme1");
        assert_eq!(storefront.title(), "MultiTheme Store - Default");
    }

    #[tokio::test]
    async fn quit_and_page_navigation() {
        let mut storefront = storefront();
        let now = Instant::now();

        assert!(!storefront.handle_action(Action::NextPage, now));
        assert_eq!(storefront.state().page, Page::About);
        storefront.handle_action(Action::ScrollDown, now);
        storefront.handle_action(Action::PrevPage, now);
        assert_eq!(storefront.state().page, Page::Home);
        assert_eq!(storefront.state().scroll, 0);
        assert!(storefront.handle_action(Action::Quit, now));
    }

    #[tokio::test]
    async fn poll_timeout_shrinks_near_deadline() {
        let mut storefront = storefront();
        let t0 = Instant::now();
        assert_eq!(storefront.poll_timeout(t0), FRAME_INTERVAL);

        storefront.store.request_theme_at("theme2", t0).unwrap();
        let almost = t0 + DEFAULT_SETTLE_INTERVAL - Duration::from_millis(5);
        assert_eq!(storefront.poll_timeout(almost), Duration::from_millis(5));
    }
}
