//! Sessions own the state a browsing screen works with: the loaded collection
//! or the detail record currently shown, plus whether loading is still in
//! progress or failed. A session is created when a view activates and dropped
//! when it goes away, which aborts any load it still has running.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::CatalogSource;
use crate::enrich::{EnrichOptions, build_collection};
use crate::error::CatalogError;
use crate::model::{CreatureDetail, EnrichedEntry};
use crate::search::filter;

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    /// Nothing loaded and nothing in flight.
    Idle,
    Loading,
    Ready(T),
    Failed(Arc<CatalogError>),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Ready(value) => LoadState::Ready(f(value)),
            LoadState::Failed(e) => LoadState::Failed(e),
        }
    }

    fn from_result(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(Arc::new(e)),
        }
    }
}

pub type Collection = Arc<[EnrichedEntry]>;

/// Catalog state tagged with the build that owns it. Every load or reload
/// starts a new generation; results from older generations are discarded.
#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    state: LoadState<Collection>,
}

type SharedState = Arc<watch::Sender<Slot>>;

/// A build that has claimed the state. If it is dropped before completing,
/// the state it replaced is put back so the session never stays `Loading`
/// with nothing running.
struct PendingBuild {
    state: SharedState,
    generation: u64,
    previous: Option<LoadState<Collection>>,
}

impl PendingBuild {
    fn start(state: &SharedState) -> Self {
        let mut generation = 0;
        let mut previous = LoadState::Idle;
        state.send_modify(|slot| {
            slot.generation += 1;
            generation = slot.generation;
            previous = std::mem::replace(&mut slot.state, LoadState::Loading);
        });

        Self {
            state: Arc::clone(state),
            generation,
            previous: Some(previous),
        }
    }

    /// Stores `next` unless a newer build has started since.
    fn complete(mut self, next: LoadState<Collection>) {
        self.previous = None;
        if !self.store(next) {
            tracing::debug!(
                "Discarding result of superseded catalog build {}",
                self.generation
            );
        }
    }

    fn store(&self, next: LoadState<Collection>) -> bool {
        self.state.send_if_modified(|slot| {
            if slot.generation != self.generation {
                return false;
            }
            slot.state = next;
            true
        })
    }
}

impl Drop for PendingBuild {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // an interrupted build never counts as a result
            let restored = if previous.is_loading() {
                LoadState::Idle
            } else {
                previous
            };
            if self.store(restored) {
                tracing::debug!("Catalog build {} was cancelled", self.generation);
            }
        }
    }
}

/// The catalog list screen: builds the enriched collection once and answers
/// queries against it.
///
/// Only the most recently started build may publish its result. Starting a
/// build, inline or in the background, aborts the background one.
pub struct CatalogSession<S> {
    source: Arc<S>,
    options: EnrichOptions,
    state: SharedState,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> CatalogSession<S>
where
    S: CatalogSource + 'static,
{
    /// Creates an `Idle` session. Nothing is fetched until
    /// [`load`](Self::load) or [`reload`](Self::reload) is called.
    pub fn new(source: Arc<S>, options: EnrichOptions) -> Self {
        let (state, _) = watch::channel(Slot {
            generation: 0,
            state: LoadState::Idle,
        });
        Self {
            source,
            options,
            state: Arc::new(state),
            task: Mutex::new(None),
        }
    }

    /// Creates the session and starts building the collection in the
    /// background. Must be called within a tokio runtime.
    pub fn activate(source: Arc<S>, options: EnrichOptions) -> Self {
        let session = Self::new(source, options);
        session.reload();
        session
    }

    /// Builds the collection in place and returns the resulting state.
    ///
    /// Dropping the returned future cancels the outstanding requests and puts
    /// back the state from before the call. If another build starts while
    /// this one runs, the result is still returned but not stored.
    pub async fn load(&self) -> LoadState<Collection> {
        let pending = {
            let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
            abort_running(&mut task);
            PendingBuild::start(&self.state)
        };

        let next = LoadState::from_result(
            build_collection(&*self.source, &self.options)
                .await
                .map(Collection::from),
        );
        pending.complete(next.clone());
        next
    }

    /// Restarts the build in the background, aborting any build still running.
    pub fn reload(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        abort_running(&mut task);

        let pending = PendingBuild::start(&self.state);
        let source = Arc::clone(&self.source);
        let options = self.options.clone();

        *task = Some(tokio::spawn(async move {
            let result = build_collection(&*source, &options).await;
            pending.complete(LoadState::from_result(result.map(Collection::from)));
        }));
    }

    /// Waits until no build is in flight and returns the state it left.
    ///
    /// The build keeps running if this future is dropped, and stays owned by
    /// the session.
    pub async fn settled(&self) -> LoadState<Collection> {
        let mut updates = self.state.subscribe();
        let settled = updates
            .wait_for(|slot| !slot.state.is_loading())
            .await
            .map(|slot| slot.state.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    pub fn state(&self) -> LoadState<Collection> {
        self.state.borrow().state.clone()
    }

    /// Entries matching `query`, evaluated against the full collection.
    pub fn search(&self, query: &str) -> LoadState<Vec<EnrichedEntry>> {
        self.state().map(|collection| filter(&collection, query))
    }

    /// Ends the session, cancelling any build still in flight.
    pub fn deactivate(self) {}
}

fn abort_running(task: &mut Option<JoinHandle<()>>) {
    if let Some(previous) = task.take() {
        if !previous.is_finished() {
            tracing::debug!("Aborting running catalog build");
        }
        previous.abort();
    }
}

impl<S> Drop for CatalogSession<S> {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            if !handle.is_finished() {
                tracing::debug!("Cancelling catalog build for discarded session");
            }
            handle.abort();
        }
    }
}

/// The detail screen for a single id, with previous/next navigation.
///
/// Every navigation fetches the record afresh.
pub struct DetailSession<S> {
    source: Arc<S>,
    id: u32,
    max_id: u32,
    state: LoadState<CreatureDetail>,
}

impl<S: CatalogSource> DetailSession<S> {
    /// Opens the detail view for `id` and fetches it. Navigation stays within
    /// `1..=max_id`.
    pub async fn open(source: Arc<S>, id: u32, max_id: u32) -> Self {
        let mut session = Self {
            source,
            id,
            max_id,
            state: LoadState::Loading,
        };
        session.load().await;
        session
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn state(&self) -> &LoadState<CreatureDetail> {
        &self.state
    }

    pub fn previous_id(&self) -> Option<u32> {
        (self.id > 1).then(|| self.id - 1)
    }

    pub fn next_id(&self) -> Option<u32> {
        (self.id < self.max_id).then(|| self.id + 1)
    }

    /// Moves to the previous id. Returns `false` at the lower bound.
    pub async fn previous(&mut self) -> bool {
        match self.previous_id() {
            Some(id) => {
                self.id = id;
                self.load().await;
                true
            }
            None => false,
        }
    }

    /// Moves to the next id. Returns `false` at the upper bound.
    pub async fn next(&mut self) -> bool {
        match self.next_id() {
            Some(id) => {
                self.id = id;
                self.load().await;
                true
            }
            None => false,
        }
    }

    /// Fetches the current id again.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.source.fetch_detail(self.id).await;
        if let Err(e) = &result {
            tracing::error!("Failed to fetch details for {}: {}", self.id, e);
        }
        self.state = LoadState::from_result(result);
    }
}
