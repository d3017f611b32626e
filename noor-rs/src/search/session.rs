//! Debounced search session
//!
//! Drives one user's keystroke-triggered searches:
//!
//! ```text
//! Idle -> Debouncing -> Searching -> Results | Empty | Error
//!            ^______________|  (every keystroke restarts the debounce)
//! ```
//!
//! Each input cancels the pending search and bumps a generation counter.
//! State transitions happen under the session lock and only for the current
//! generation, so a superseded search can never publish its result.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::manager::SearchManager;
use super::types::{SearchResults, SearchTab};

/// Observable session state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Debouncing { query: String },
    Searching { query: String },
    Results(SearchResults),
    Empty { query: String },
    /// The corpus could not be searched. Carries no detail; the cause is
    /// only logged.
    Error { query: String },
}

struct Inner {
    tab: SearchTab,
    query: String,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// One search session (e.g. one open search box)
pub struct SearchSession {
    manager: Arc<SearchManager>,
    debounce: Duration,
    inner: Arc<Mutex<Inner>>,
    state: Arc<watch::Sender<SessionState>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SearchSession {
    pub fn new(manager: Arc<SearchManager>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            manager,
            debounce,
            inner: Arc::new(Mutex::new(Inner {
                tab: SearchTab::Quran,
                query: String::new(),
                generation: 0,
                pending: None,
            })),
            state: Arc::new(state),
        }
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn tab(&self) -> SearchTab {
        lock(&self.inner).tab
    }

    /// Record a keystroke: the whole current query text
    pub fn input(&self, query: &str) {
        let mut inner = lock(&self.inner);
        inner.query = query.to_string();
        self.schedule(&mut inner);
    }

    /// Switch corpus. Results of the previous tab are dropped and the
    /// current query is searched again from scratch.
    pub fn switch_tab(&self, tab: SearchTab) {
        let mut inner = lock(&self.inner);
        if inner.tab == tab {
            return;
        }
        inner.tab = tab;
        self.state.send_replace(SessionState::Idle);
        self.schedule(&mut inner);
    }

    fn schedule(&self, inner: &mut Inner) {
        inner.generation += 1;
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }

        if inner.query.trim().is_empty() {
            self.state.send_replace(SessionState::Idle);
            return;
        }
        let query = inner.query.clone();
        if !self.manager.accepts(&query) {
            self.state.send_replace(SessionState::Empty { query });
            return;
        }

        self.state
            .send_replace(SessionState::Debouncing { query: query.clone() });

        let generation = inner.generation;
        let tab = inner.tab;
        let debounce = self.debounce;
        let manager = Arc::clone(&self.manager);
        let shared = Arc::clone(&self.inner);
        let state = Arc::clone(&self.state);

        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            if !publish(&shared, &state, generation, SessionState::Searching { query: query.clone() }) {
                return;
            }

            let next = match manager.try_search(tab, &query).await {
                Ok(results) if results.is_empty() => SessionState::Empty { query },
                Ok(results) => SessionState::Results(results),
                Err(e) => {
                    warn!("Session {} search for '{}' failed: {}", tab, query, e);
                    SessionState::Error { query }
                }
            };

            publish(&shared, &state, generation, next);
        }));
    }
}

/// Publish `next` if `generation` is still current
fn publish(
    inner: &Mutex<Inner>,
    state: &watch::Sender<SessionState>,
    generation: u64,
    next: SessionState,
) -> bool {
    let guard = lock(inner);
    if guard.generation != generation {
        debug!("Dropping superseded search state (generation {})", generation);
        return false;
    }
    state.send_replace(next);
    true
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.inner).pending.take() {
            pending.abort();
        }
    }
}
