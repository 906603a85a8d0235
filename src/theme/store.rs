//! Persisted, reactive theme selection
//!
//! The store holds the committed theme id and at most one pending commit.
//! A request does not switch the theme immediately: it marks the store as
//! transitioning and schedules a commit one settle interval later. The
//! application loop drives commits by calling [`ThemeStore::poll`]. A new
//! request while a commit is pending replaces it and restarts the interval,
//! so each transition cycle ends in exactly one commit.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{THEME_STORAGE_KEY, ThemeCatalog, ThemeConfig, ThemeError, ThemeId};
use crate::storage::{PersistentCell, Storage};

/// Delay between a theme request and its commit
pub const DEFAULT_SETTLE_INTERVAL: Duration = Duration::from_millis(150);

/// What a subscriber sees on every state change
#[derive(Debug, Clone)]
pub struct ThemeSnapshot {
    /// The committed configuration
    pub configuration: Arc<ThemeConfig>,
    /// Whether a commit is pending
    pub is_transitioning: bool,
}

/// Observable state of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeState {
    Idle { current: ThemeId },
    Transitioning { from: ThemeId, to: ThemeId },
}

/// Result of a theme request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The requested theme is already active and nothing is pending
    Unchanged,
    /// A new transition started
    Started,
    /// A pending transition was redirected to the new target
    Superseded,
}

/// Handle returned by [`ThemeStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ThemeSnapshot)>;

/// The single scheduled commit slot
struct PendingCommit {
    target: Arc<ThemeConfig>,
    due: Instant,
}

/// Owner of the selected theme
pub struct ThemeStore {
    catalog: Arc<ThemeCatalog>,
    selected: PersistentCell<ThemeId>,
    current: Arc<ThemeConfig>,
    pending: Option<PendingCommit>,
    settle_interval: Duration,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ThemeStore {
    /// Create a store, restoring the persisted theme if it is still valid
    ///
    /// Never fails: a missing, corrupt or unknown persisted id resolves to
    /// the catalog's first theme.
    pub fn new(
        catalog: Arc<ThemeCatalog>,
        storage: Option<Arc<dyn Storage>>,
        settle_interval: Duration,
    ) -> Self {
        let default_id = catalog.default_id().clone();
        let mut selected = PersistentCell::open(storage, THEME_STORAGE_KEY, default_id);

        let current = match catalog.get(selected.get().as_str()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; falling back to {}", e, catalog.default_id());
                selected.reset(catalog.default_id().clone());
                catalog.default_config()
            }
        };
        tracing::debug!("Theme store starting on {}", current.id);

        Self {
            catalog,
            selected,
            current,
            pending: None,
            settle_interval,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The committed configuration (never the in-flight target)
    pub fn configuration(&self) -> Arc<ThemeConfig> {
        Arc::clone(&self.current)
    }

    /// Id of the committed theme
    pub fn current_id(&self) -> &ThemeId {
        &self.current.id
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> ThemeState {
        match &self.pending {
            None => ThemeState::Idle { current: self.current.id.clone() },
            Some(pending) => ThemeState::Transitioning {
                from: self.current.id.clone(),
                to: pending.target.id.clone(),
            },
        }
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot { configuration: self.configuration(), is_transitioning: self.is_transitioning() }
    }

    pub fn catalog(&self) -> &Arc<ThemeCatalog> {
        &self.catalog
    }

    pub fn settle_interval(&self) -> Duration {
        self.settle_interval
    }

    /// When the pending commit becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Request a theme switch, starting the settle interval now
    pub fn request_theme(&mut self, target: &str) -> Result<RequestOutcome, ThemeError> {
        self.request_theme_at(target, Instant::now())
    }

    /// Request a theme switch, starting the settle interval at `now`
    pub fn request_theme_at(
        &mut self,
        target: &str,
        now: Instant,
    ) -> Result<RequestOutcome, ThemeError> {
        let target = self.catalog.get(target)?;

        let outcome = match &self.pending {
            None if target.id == self.current.id => return Ok(RequestOutcome::Unchanged),
            None => {
                tracing::debug!("Theme transition {} -> {}", self.current.id, target.id);
                RequestOutcome::Started
            }
            Some(pending) => {
                tracing::debug!(
                    "Superseding pending switch to {} with {}",
                    pending.target.id,
                    target.id
                );
                RequestOutcome::Superseded
            }
        };

        self.pending = Some(PendingCommit { target, due: now + self.settle_interval });

        // Superseding keeps the flag set, so listeners already know
        if outcome == RequestOutcome::Started {
            self.notify();
        }
        Ok(outcome)
    }

    /// Commit the pending transition if its settle interval has elapsed
    ///
    /// Returns whether a commit happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = matches!(&self.pending, Some(pending) if pending.due <= now);
        if due {
            self.commit();
        }
        due
    }

    /// Commit the pending transition without waiting
    pub fn finish_pending(&mut self) -> bool {
        if self.pending.is_none() {
            return false;
        }
        self.commit();
        true
    }

    /// Discard the pending commit without writing or notifying
    ///
    /// Used when the owning scope goes away.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                tracing::debug!("Cancelled pending switch to {}", pending.target.id);
                true
            }
            None => false,
        }
    }

    /// Register a listener for every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&ThemeSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() < before
    }

    fn commit(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let persisted = self.selected.set(pending.target.id.clone());
        self.current = pending.target;
        tracing::info!(theme = %self.current.id, persisted, "Theme committed");

        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl Drop for ThemeStore {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state())
            .field("settle_interval", &self.settle_interval)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
