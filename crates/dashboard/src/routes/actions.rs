//! Action handlers.
//!
//! Actions start store operations on background tasks and redirect at once
//! (Post/Redirect/Get). Pages reload themselves until the store is idle.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use recdash_core::{UserId, View};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::api::CatalogApi;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;
use crate::store::{AlreadyRunning, Notice};

/// Recommendation request form.
#[derive(Debug, Deserialize)]
pub struct RecommendationForm {
    pub user_id: String,
}

/// Request recommendations for the user in the path.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the user id is blank.
#[instrument(skip(state))]
pub async fn recommend_for_user<A: CatalogApi>(
    State(state): State<AppState<A>>,
    Path(user_id): Path<String>,
) -> Result<Redirect> {
    let user_id = UserId::parse(&user_id)?;
    Ok(request_recommendations(&state, user_id).await)
}

/// Request recommendations for the user picked in the form.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the user id is blank.
#[instrument(skip(state))]
pub async fn recommend_from_form<A: CatalogApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<RecommendationForm>,
) -> Result<Redirect> {
    let user_id = UserId::parse(&form.user_id)?;
    Ok(request_recommendations(&state, user_id).await)
}

/// Start sample data generation and return to the dashboard.
#[instrument(skip(state))]
pub async fn generate_data<A: CatalogApi>(State(state): State<AppState<A>>) -> Redirect {
    add_breadcrumb("action", "Generate sample data", None);

    let store = state.store();
    match store.spawn_generation() {
        Ok(_task) => info!("Sample data generation started"),
        Err(err) => reject(&state, &err).await,
    }
    store.switch_view(View::Dashboard).await;
    Redirect::to("/")
}

async fn request_recommendations<A: CatalogApi>(state: &AppState<A>, user_id: UserId) -> Redirect {
    add_breadcrumb(
        "action",
        "Request recommendations",
        Some(&[("user_id", user_id.as_str())]),
    );

    let store = state.store();
    match store.spawn_recommendations(user_id) {
        Ok(_task) => info!("Recommendation fetch started"),
        Err(err) => reject(state, &err).await,
    }
    store.switch_view(View::Recommendations).await;
    Redirect::to(View::Recommendations.path())
}

async fn reject<A: CatalogApi>(state: &AppState<A>, err: &AlreadyRunning) {
    info!("Action rejected: {err}");
    state
        .store()
        .post_notice(Notice::warning(err.0.busy_message()))
        .await;
}
