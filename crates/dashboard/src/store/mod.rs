//! Application state store.
//!
//! The store is the single owner of everything the dashboard renders: the
//! fetched user and product lists, the current recommendation selection, the
//! active view and a pending operator notice. Renderers only ever see a
//! [`Snapshot`].
//!
//! Two categories of backend work can be in flight at once, each limited to
//! a single task:
//!
//! - fetching recommendations for a user ([`TaskKind::Recommendations`])
//! - regenerating sample data and refreshing the lists ([`TaskKind::Generation`])
//!
//! A request for a category that is already running is rejected with
//! [`AlreadyRunning`] instead of being queued. Once started, an operation
//! always runs to completion, even if the request that started it goes away.

mod notice;
mod slot;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use recdash_core::{GenerationSummary, Product, Recommendation, User, UserId, View};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::api::{ApiError, CatalogApi};

pub use notice::{Notice, NoticeLevel};
pub use slot::{SlotGuard, TaskSlot};

/// Category of backend work tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Recommendations,
    Generation,
}

impl TaskKind {
    /// Message shown when a second task of this kind is refused.
    #[must_use]
    pub const fn busy_message(self) -> &'static str {
        match self {
            Self::Recommendations => {
                "Recommendations are already being fetched. Try again when they finish."
            }
            Self::Generation => "Sample data generation is already running.",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommendations => write!(f, "recommendation fetch"),
            Self::Generation => write!(f, "sample data generation"),
        }
    }
}

/// A task of the same kind is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} already in progress")]
pub struct AlreadyRunning(pub TaskKind);

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A task of the same kind is still running.
    #[error("{0} already in progress")]
    Busy(TaskKind),

    /// The backend call failed; state was left unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<AlreadyRunning> for StoreError {
    fn from(AlreadyRunning(kind): AlreadyRunning) -> Self {
        Self::Busy(kind)
    }
}

/// The recommendations on screen and the user they belong to.
///
/// Always replaced as a whole so the list and the user can never disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Id the recommendations were requested for.
    pub user_id: Option<UserId>,
    /// Matching entry from the user list, if it was present at the time.
    pub selected_user: Option<User>,
    pub recommendations: Vec<Recommendation>,
    pub recommendation_type: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: Arc<[User]>,
    products: Arc<[Product]>,
    selection: Arc<Selection>,
    active_view: View,
    notice: Option<Notice>,
}

/// Read-only copy of the store, cheap to take on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub users: Arc<[User]>,
    pub products: Arc<[Product]>,
    pub selection: Arc<Selection>,
    pub active_view: View,
    pub fetching_recommendations: bool,
    pub generating: bool,
}

impl Snapshot {
    /// Whether any backend work is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.fetching_recommendations || self.generating
    }
}

/// Outcome of refreshing both lists. Each side fails independently.
#[derive(Debug)]
pub struct RefreshReport {
    pub users: Result<usize, ApiError>,
    pub products: Result<usize, ApiError>,
}

impl RefreshReport {
    /// Whether both lists were refreshed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.users.is_ok() && self.products.is_ok()
    }
}

/// Outcome of a successful generation run.
#[derive(Debug)]
pub struct GenerationReport {
    /// Counts reported by the backend, when it sent any.
    pub summary: Option<GenerationSummary>,
    /// Result of the list refresh that follows generation.
    pub refresh: RefreshReport,
}

/// Shared application state store.
///
/// Clones share the same state.
pub struct Store<A> {
    inner: Arc<StoreInner<A>>,
}

struct StoreInner<A> {
    api: A,
    fetch_limit: usize,
    state: RwLock<StoreState>,
    recommendations: TaskSlot,
    generation: TaskSlot,
}

impl<A> Clone for Store<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: CatalogApi> Store<A> {
    /// Create an empty store on the dashboard view.
    #[must_use]
    pub fn new(api: A, fetch_limit: usize) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                api,
                fetch_limit,
                state: RwLock::new(StoreState::default()),
                recommendations: TaskSlot::new(),
                generation: TaskSlot::new(),
            }),
        }
    }

    /// Backend used by this store.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Copy the current state for rendering.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.inner.state.read().await;
        Snapshot {
            users: Arc::clone(&state.users),
            products: Arc::clone(&state.products),
            selection: Arc::clone(&state.selection),
            active_view: state.active_view,
            fetching_recommendations: self.inner.recommendations.is_running(),
            generating: self.inner.generation.is_running(),
        }
    }

    /// Whether any backend work is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.recommendations.is_running() || self.inner.generation.is_running()
    }

    /// Whether a task of `kind` is in flight.
    #[must_use]
    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.slot(kind).is_running()
    }

    /// Make `view` the active view. Never touches the network.
    pub async fn switch_view(&self, view: View) {
        let mut state = self.inner.state.write().await;
        if state.active_view != view {
            debug!(from = %state.active_view, to = %view, "Switching view");
            state.active_view = view;
        }
    }

    /// Queue a notice for the next rendered page, replacing any pending one.
    pub async fn post_notice(&self, notice: Notice) {
        self.inner.state.write().await.notice = Some(notice);
    }

    /// Take the pending notice, if any. Each notice is shown once.
    pub async fn take_notice(&self) -> Option<Notice> {
        self.inner.state.write().await.notice.take()
    }

    /// Fetch users and products concurrently.
    ///
    /// Each list is replaced only when its own fetch succeeds; a failure
    /// leaves that list as it was and is logged.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> RefreshReport {
        let (users, products) = tokio::join!(self.refresh_users(), self.refresh_products());
        RefreshReport { users, products }
    }

    /// Run [`Store::initialize`] in the background.
    pub fn spawn_initialize(&self) -> JoinHandle<RefreshReport> {
        let store = self.clone();
        tokio::spawn(async move { store.initialize().await })
    }

    /// Fetch recommendations for `user_id` and make them the selection.
    ///
    /// Returns the number of recommendations received.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Busy` if a recommendation fetch is already
    /// running, or `StoreError::Api` if the backend call fails. On failure
    /// the previous selection stays in place.
    pub async fn select_user_and_fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<usize, StoreError> {
        let guard = self.claim(TaskKind::Recommendations)?;
        self.fetch_recommendations(guard, user_id).await
    }

    /// Start a recommendation fetch on a detached task.
    ///
    /// The slot is claimed before this returns, so a busy store is reported
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyRunning`] if a recommendation fetch is already running.
    pub fn spawn_recommendations(
        &self,
        user_id: UserId,
    ) -> Result<JoinHandle<Result<usize, StoreError>>, AlreadyRunning> {
        let guard = self.claim(TaskKind::Recommendations)?;
        let store = self.clone();
        Ok(tokio::spawn(async move {
            store.fetch_recommendations(guard, &user_id).await
        }))
    }

    /// Regenerate the backend catalog, then refetch both lists.
    ///
    /// Posts a success or failure notice for the operator before the
    /// generation slot is released.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Busy` if generation is already running, or
    /// `StoreError::Api` if the generation call itself fails. Refetch failures
    /// are reported in [`GenerationReport::refresh`] instead.
    pub async fn generate_sample_data_and_refresh(&self) -> Result<GenerationReport, StoreError> {
        let guard = self.claim(TaskKind::Generation)?;
        self.generate(guard).await
    }

    /// Start sample data generation on a detached task.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyRunning`] if generation is already running.
    pub fn spawn_generation(
        &self,
    ) -> Result<JoinHandle<Result<GenerationReport, StoreError>>, AlreadyRunning> {
        let guard = self.claim(TaskKind::Generation)?;
        let store = self.clone();
        Ok(tokio::spawn(async move { store.generate(guard).await }))
    }

    fn slot(&self, kind: TaskKind) -> &TaskSlot {
        match kind {
            TaskKind::Recommendations => &self.inner.recommendations,
            TaskKind::Generation => &self.inner.generation,
        }
    }

    fn claim(&self, kind: TaskKind) -> Result<SlotGuard, AlreadyRunning> {
        self.slot(kind).try_acquire().ok_or_else(|| {
            debug!(%kind, "Rejecting request, task already running");
            AlreadyRunning(kind)
        })
    }

    async fn refresh_users(&self) -> Result<usize, ApiError> {
        match self.inner.api.list_users(self.inner.fetch_limit).await {
            Ok(users) => {
                let count = users.len();
                self.inner.state.write().await.users = users.into();
                info!(count, "Loaded users");
                Ok(count)
            }
            Err(e) => {
                error!("Failed to fetch users: {e}");
                Err(e)
            }
        }
    }

    async fn refresh_products(&self) -> Result<usize, ApiError> {
        match self.inner.api.list_products(self.inner.fetch_limit).await {
            Ok(products) => {
                let count = products.len();
                self.inner.state.write().await.products = products.into();
                info!(count, "Loaded products");
                Ok(count)
            }
            Err(e) => {
                error!("Failed to fetch products: {e}");
                Err(e)
            }
        }
    }

    // The guard is a parameter so it drops after the state write.
    #[instrument(skip(self, _guard, user_id), fields(user_id = %user_id))]
    async fn fetch_recommendations(
        &self,
        _guard: SlotGuard,
        user_id: &UserId,
    ) -> Result<usize, StoreError> {
        let set = match self.inner.api.get_recommendations(user_id).await {
            Ok(set) => set,
            Err(e) => {
                error!("Failed to fetch recommendations: {e}");
                return Err(e.into());
            }
        };

        let count = set.recommendations.len();
        let mut state = self.inner.state.write().await;
        let selected_user = User::find(&state.users, user_id).cloned();
        if selected_user.is_none() {
            warn!("Recommendations received for a user not in the loaded list");
        }
        state.selection = Arc::new(Selection {
            user_id: Some(user_id.clone()),
            selected_user,
            recommendations: set.recommendations,
            recommendation_type: set.recommendation_type,
            generated_at: set.generated_at,
        });
        info!(count, "Loaded recommendations");
        Ok(count)
    }

    #[instrument(skip(self, _guard))]
    async fn generate(&self, _guard: SlotGuard) -> Result<GenerationReport, StoreError> {
        let summary = match self.inner.api.generate_sample_data().await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Failed to generate sample data: {e}");
                self.post_notice(Notice::generation_failed()).await;
                return Err(e.into());
            }
        };
        info!(?summary, "Sample data generated, refreshing lists");

        let refresh = self.initialize().await;
        if !refresh.is_complete() {
            warn!("Sample data generated but the lists could not be fully refreshed");
        }

        let report = GenerationReport { summary, refresh };
        self.post_notice(Notice::generation_succeeded(&report)).await;
        Ok(report)
    }
}
