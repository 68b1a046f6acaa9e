//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiClient, CatalogApi};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Generic over the backend so the router can be
/// exercised against an in-memory API.
pub struct AppState<A = ApiClient> {
    inner: Arc<AppStateInner<A>>,
}

struct AppStateInner<A> {
    store: Store<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: CatalogApi> AppState<A> {
    /// Create a new application state around `store`.
    #[must_use]
    pub fn new(store: Store<A>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the state store.
    #[must_use]
    pub fn store(&self) -> &Store<A> {
        &self.inner.store
    }
}
