//! Immutable list snapshots and the store that publishes them.

use std::{collections::BTreeSet, sync::Arc};

use shared::domain::{SecretId, SecretSummary};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Everything the panel needs to render, as of one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Every secret loaded so far, in provider order.
    pub all_secrets: Vec<SecretSummary>,
    /// `all_secrets` narrowed by `search_query`.
    pub visible_secrets: Vec<SecretSummary>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error_message: Option<String>,
    pub search_query: String,
    pub expanded_ids: BTreeSet<SecretId>,
    pub page_size: usize,
    pub next_offset: usize,
    pub has_more: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all_secrets: Vec::new(),
            visible_secrets: Vec::new(),
            is_loading: false,
            is_loading_more: false,
            error_message: None,
            search_query: String::new(),
            expanded_ids: BTreeSet::new(),
            page_size,
            next_offset: 0,
            has_more: true,
        }
    }

    pub fn is_filtering(&self) -> bool {
        !is_blank(&self.search_query)
    }

    pub fn is_expanded(&self, id: &SecretId) -> bool {
        self.expanded_ids.contains(id)
    }

    /// No fetch of either kind is in flight.
    pub fn is_idle(&self) -> bool {
        !self.is_loading && !self.is_loading_more
    }
}

pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Secrets whose website or username contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn filter_secrets(secrets: &[SecretSummary], query: &str) -> Vec<SecretSummary> {
    if is_blank(query) {
        return secrets.to_vec();
    }

    let needle = query.to_lowercase();
    secrets
        .iter()
        .filter(|secret| {
            secret.website.to_lowercase().contains(&needle)
                || secret.username.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stream of snapshots that starts with the current one.
pub type StateStream = WatchStream<Arc<ListState>>;

/// Holds the single current snapshot and pushes replacements to subscribers.
pub struct StateStore {
    tx: watch::Sender<Arc<ListState>>,
}

impl StateStore {
    pub fn new(initial: ListState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    pub fn current(&self) -> Arc<ListState> {
        self.tx.borrow().clone()
    }

    /// Publish the snapshot derived from the current one by `f`.
    ///
    /// Subscribers are only woken when the derived snapshot differs.
    pub fn update(&self, f: impl FnOnce(&ListState) -> ListState) {
        self.tx.send_if_modified(|slot| {
            let next = f(&**slot);
            if next == **slot {
                return false;
            }
            *slot = Arc::new(next);
            true
        });
    }

    pub fn subscribe(&self) -> StateStream {
        WatchStream::new(self.tx.subscribe())
    }

    pub fn receiver(&self) -> watch::Receiver<Arc<ListState>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
