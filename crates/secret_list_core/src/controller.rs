use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::{
    domain::SecretId,
    error::{FetchError, PROVIDER_UNAVAILABLE},
    protocol::{PageRequest, SecretPage},
};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    config::ListSettings,
    state::{filter_secrets, ListState, StateStore, StateStream},
    SecretDataProvider,
};

/// Owns the secret list state for one panel instance.
///
/// Fetches run on the host runtime. A full reload supersedes both an earlier
/// reload and any pagination in flight; pagination only supersedes earlier
/// pagination. Superseded completions are dropped without touching state.
#[derive(Clone)]
pub struct SecretListController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    provider: Option<Arc<dyn SecretDataProvider>>,
    runtime: Handle,
    store: StateStore,
    fetches: Mutex<FetchSlots>,
}

#[derive(Default)]
struct FetchSlots {
    next_generation: u64,
    load: Option<InFlightFetch>,
    load_more: Option<InFlightFetch>,
}

struct InFlightFetch {
    generation: u64,
    task: JoinHandle<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Load,
    LoadMore,
}

impl FetchSlots {
    fn issue_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn slot_mut(&mut self, kind: FetchKind) -> &mut Option<InFlightFetch> {
        match kind {
            FetchKind::Load => &mut self.load,
            FetchKind::LoadMore => &mut self.load_more,
        }
    }

    fn cancel(&mut self, kind: FetchKind) {
        if let Some(fetch) = self.slot_mut(kind).take() {
            debug!(?kind, generation = fetch.generation, "secret list: cancelling fetch");
            fetch.task.abort();
        }
    }

    /// Clears the slot if it still belongs to `generation`.
    fn settle(&mut self, kind: FetchKind, generation: u64) -> bool {
        let slot = self.slot_mut(kind);
        if slot.as_ref().map(|fetch| fetch.generation) == Some(generation) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

impl SecretListController {
    /// Build the controller and start the first load right away.
    pub fn new(
        provider: Option<Arc<dyn SecretDataProvider>>,
        runtime: Handle,
        settings: &ListSettings,
    ) -> Self {
        let controller = Self {
            inner: Arc::new(ControllerInner {
                provider,
                runtime,
                store: StateStore::new(ListState::with_page_size(settings.page_size)),
                fetches: Mutex::new(FetchSlots::default()),
            }),
        };
        controller.load_secrets();
        controller
    }

    pub fn state(&self) -> Arc<ListState> {
        self.inner.store.current()
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    /// Resolve once no load or pagination fetch is in flight.
    pub async fn wait_until_idle(&self) -> Arc<ListState> {
        let mut rx = self.inner.store.receiver();
        let idle = match rx.wait_for(|state| state.is_idle()).await {
            Ok(state) => Arc::clone(&state),
            Err(_) => self.state(),
        };
        idle
    }

    pub fn load_secrets(&self) {
        let Some(provider) = self.inner.provider.clone() else {
            warn!("secret list: data provider not available");
            self.inner.store.update(|state| ListState {
                is_loading: false,
                error_message: Some(PROVIDER_UNAVAILABLE.to_string()),
                ..state.clone()
            });
            return;
        };

        let mut fetches = self.inner.lock_fetches();
        fetches.cancel(FetchKind::Load);
        fetches.cancel(FetchKind::LoadMore);

        self.inner.store.update(|state| ListState {
            visible_secrets: state.all_secrets.clone(),
            is_loading: true,
            is_loading_more: false,
            error_message: None,
            search_query: String::new(),
            next_offset: 0,
            has_more: true,
            ..state.clone()
        });

        let request = PageRequest::first(self.inner.store.current().page_size);
        self.inner
            .spawn_fetch(&mut fetches, FetchKind::Load, provider, request);
    }

    pub fn load_more_secrets(&self) {
        let Some(provider) = self.inner.provider.clone() else {
            return;
        };

        let mut fetches = self.inner.lock_fetches();
        let current = self.inner.store.current();
        if current.is_loading_more
            || !current.has_more
            || current.is_loading
            || current.is_filtering()
        {
            debug!(
                is_loading = current.is_loading,
                is_loading_more = current.is_loading_more,
                has_more = current.has_more,
                filtering = current.is_filtering(),
                "secret list: ignoring pagination request"
            );
            return;
        }

        fetches.cancel(FetchKind::LoadMore);
        self.inner.store.update(|state| ListState {
            is_loading_more: true,
            ..state.clone()
        });

        let request = PageRequest::at(current.page_size, current.next_offset);
        self.inner
            .spawn_fetch(&mut fetches, FetchKind::LoadMore, provider, request);
    }

    /// Narrow the visible list to already loaded secrets matching `query`.
    pub fn search_secrets(&self, query: &str) {
        self.inner.store.update(|state| ListState {
            visible_secrets: filter_secrets(&state.all_secrets, query),
            search_query: query.to_string(),
            ..state.clone()
        });
    }

    pub fn toggle_metadata_expanded(&self, id: &SecretId) {
        self.inner.store.update(|state| {
            let mut expanded_ids = state.expanded_ids.clone();
            if !expanded_ids.remove(id) {
                expanded_ids.insert(id.clone());
            }
            ListState {
                expanded_ids,
                ..state.clone()
            }
        });
    }

    pub fn clear_error(&self) {
        self.inner.store.update(|state| ListState {
            error_message: None,
            ..state.clone()
        });
    }
}

impl ControllerInner {
    fn lock_fetches(&self) -> MutexGuard<'_, FetchSlots> {
        self.fetches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // The caller holds the slot lock until the handle is stored, so a fast
    // completion cannot observe an empty slot.
    fn spawn_fetch(
        self: &Arc<Self>,
        fetches: &mut FetchSlots,
        kind: FetchKind,
        provider: Arc<dyn SecretDataProvider>,
        request: PageRequest,
    ) {
        let generation = fetches.issue_generation();
        info!(
            ?kind,
            generation,
            limit = request.limit,
            offset = request.offset,
            "secret list: fetching page"
        );

        let controller = Arc::downgrade(self);
        let task = self.runtime.spawn(async move {
            let result = provider
                .fetch_secrets_page(request.limit, request.offset)
                .await;
            complete_fetch(controller, kind, generation, result);
        });
        *fetches.slot_mut(kind) = Some(InFlightFetch { generation, task });
    }

    fn apply_page(&self, kind: FetchKind, page: SecretPage) {
        let received = page.len();
        let has_more = page.has_more;
        match kind {
            FetchKind::Load => self.store.update(|state| ListState {
                all_secrets: page.items.clone(),
                visible_secrets: page.items,
                is_loading: false,
                next_offset: received,
                has_more,
                ..state.clone()
            }),
            FetchKind::LoadMore => self.store.update(|state| {
                let mut all_secrets = state.all_secrets.clone();
                all_secrets.extend(page.items);
                let visible_secrets = if state.is_filtering() {
                    state.visible_secrets.clone()
                } else {
                    all_secrets.clone()
                };
                ListState {
                    all_secrets,
                    visible_secrets,
                    is_loading_more: false,
                    next_offset: state.next_offset + received,
                    has_more,
                    ..state.clone()
                }
            }),
        }
        info!(?kind, received, has_more, "secret list: page applied");
    }

    /// The provider gave up on a fetch nothing superseded: stop loading
    /// without reporting an error.
    fn apply_cancellation(&self, kind: FetchKind) {
        match kind {
            FetchKind::Load => self.store.update(|state| ListState {
                is_loading: false,
                ..state.clone()
            }),
            FetchKind::LoadMore => self.store.update(|state| ListState {
                is_loading_more: false,
                ..state.clone()
            }),
        }
    }

    fn apply_failure(&self, kind: FetchKind, err: FetchError) {
        warn!(?kind, code = ?err.code(), error = %err, "secret list: fetch failed");
        let error_message = Some(err.to_string());
        match kind {
            FetchKind::Load => self.store.update(|state| ListState {
                is_loading: false,
                error_message,
                ..state.clone()
            }),
            FetchKind::LoadMore => self.store.update(|state| ListState {
                is_loading_more: false,
                error_message,
                ..state.clone()
            }),
        }
    }
}

fn complete_fetch(
    controller: Weak<ControllerInner>,
    kind: FetchKind,
    generation: u64,
    result: Result<SecretPage, FetchError>,
) {
    let Some(inner) = controller.upgrade() else {
        debug!(?kind, generation, "secret list: panel gone, dropping fetch result");
        return;
    };

    let mut fetches = inner.lock_fetches();
    if !fetches.settle(kind, generation) {
        debug!(?kind, generation, "secret list: discarding superseded fetch result");
        return;
    }

    match result {
        Ok(page) => inner.apply_page(kind, page),
        Err(err) if err.is_cancelled() => {
            debug!(?kind, generation, "secret list: provider reported cancellation");
            inner.apply_cancellation(kind);
        }
        Err(err) => inner.apply_failure(kind, err),
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        let fetches = self
            .fetches
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for fetch in [fetches.load.take(), fetches.load_more.take()]
            .into_iter()
            .flatten()
        {
            fetch.task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
