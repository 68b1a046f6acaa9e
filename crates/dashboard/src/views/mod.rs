//! View router and renderers.
//!
//! Every page is a pure function of a [`Snapshot`]: [`route`] picks the
//! renderer for the active view and each renderer builds its template from
//! the snapshot alone.

mod dashboard;
mod products;
mod recommendations;
mod users;

use axum::response::{IntoResponse, Response};
use recdash_core::View;

use crate::store::{Notice, Snapshot};

pub use dashboard::DashboardTemplate;
pub use products::{ProductCardView, ProductsTemplate};
pub use recommendations::{PanelState, RecommendationCardView, RecommendationsTemplate};
pub use users::{UserCardView, UsersTemplate};

/// Seconds between reloads while backend work is in flight.
pub const REFRESH_INTERVAL_SECS: u32 = 2;

/// Navigation tab.
#[derive(Debug, Clone)]
pub struct TabView {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Parts shared by every page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub title: &'static str,
    pub tabs: Vec<TabView>,
    pub notice: Option<Notice>,
    /// Reload the page until the store is idle again.
    pub auto_refresh: bool,
    pub refresh_secs: u32,
    pub busy_message: Option<&'static str>,
}

impl Layout {
    fn new(view: View, snapshot: &Snapshot, notice: Option<Notice>) -> Self {
        let busy_message = if snapshot.generating {
            Some("Generating sample data...")
        } else if snapshot.fetching_recommendations {
            Some("Fetching recommendations...")
        } else {
            None
        };

        Self {
            title: view.label(),
            tabs: View::ALL
                .into_iter()
                .map(|tab| TabView {
                    label: tab.label(),
                    path: tab.path(),
                    active: tab == view,
                })
                .collect(),
            notice,
            auto_refresh: snapshot.is_busy(),
            refresh_secs: REFRESH_INTERVAL_SECS,
            busy_message,
        }
    }
}

/// A rendered view.
pub enum Page {
    Dashboard(DashboardTemplate),
    Users(UsersTemplate),
    Products(ProductsTemplate),
    Recommendations(RecommendationsTemplate),
}

impl Page {
    /// The view this page renders.
    #[must_use]
    pub const fn view(&self) -> View {
        match self {
            Self::Dashboard(_) => View::Dashboard,
            Self::Users(_) => View::Users,
            Self::Products(_) => View::Products,
            Self::Recommendations(_) => View::Recommendations,
        }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Self::Dashboard(page) => page.into_response(),
            Self::Users(page) => page.into_response(),
            Self::Products(page) => page.into_response(),
            Self::Recommendations(page) => page.into_response(),
        }
    }
}

/// Select and build the renderer for `view`.
#[must_use]
pub fn route(view: View, snapshot: &Snapshot, notice: Option<Notice>) -> Page {
    let layout = Layout::new(view, snapshot, notice);
    match view {
        View::Dashboard => Page::Dashboard(DashboardTemplate::build(layout, snapshot)),
        View::Users => Page::Users(UsersTemplate::build(layout, snapshot)),
        View::Products => Page::Products(ProductsTemplate::build(layout, snapshot)),
        View::Recommendations => {
            Page::Recommendations(RecommendationsTemplate::build(layout, snapshot))
        }
    }
}

/// Format a dollar amount, e.g. `$19.99`.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
