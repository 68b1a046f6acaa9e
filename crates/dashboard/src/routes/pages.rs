//! Page handlers: switch the active view and render it.

use axum::extract::State;
use recdash_core::View;
use tracing::instrument;

use crate::api::CatalogApi;
use crate::state::AppState;
use crate::views::{self, Page};

/// Render the active view.
#[instrument(skip(state))]
pub async fn index<A: CatalogApi>(State(state): State<AppState<A>>) -> Page {
    render(&state).await
}

#[instrument(skip(state))]
pub async fn dashboard<A: CatalogApi>(State(state): State<AppState<A>>) -> Page {
    show(&state, View::Dashboard).await
}

#[instrument(skip(state))]
pub async fn users<A: CatalogApi>(State(state): State<AppState<A>>) -> Page {
    show(&state, View::Users).await
}

#[instrument(skip(state))]
pub async fn products<A: CatalogApi>(State(state): State<AppState<A>>) -> Page {
    show(&state, View::Products).await
}

#[instrument(skip(state))]
pub async fn recommendations<A: CatalogApi>(State(state): State<AppState<A>>) -> Page {
    show(&state, View::Recommendations).await
}

async fn show<A: CatalogApi>(state: &AppState<A>, view: View) -> Page {
    state.store().switch_view(view).await;
    render(state).await
}

async fn render<A: CatalogApi>(state: &AppState<A>) -> Page {
    let store = state.store();
    let snapshot = store.snapshot().await;
    let notice = store.take_notice().await;
    views::route(snapshot.active_view, &snapshot, notice)
}
