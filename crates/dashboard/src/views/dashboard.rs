//! Dashboard renderer.

use askama::Template;
use askama_web::WebTemplate;

use super::Layout;
use crate::store::Snapshot;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub user_count: usize,
    pub product_count: usize,
    pub recommendation_count: usize,
    pub generating: bool,
}

impl DashboardTemplate {
    pub(super) fn build(layout: Layout, snapshot: &Snapshot) -> Self {
        Self {
            layout,
            user_count: snapshot.users.len(),
            product_count: snapshot.products.len(),
            recommendation_count: snapshot.selection.recommendations.len(),
            generating: snapshot.generating,
        }
    }

    /// Label of the generate action.
    #[must_use]
    pub const fn generate_label(&self) -> &'static str {
        if self.generating {
            "Generating..."
        } else {
            "Generate Sample Data"
        }
    }
}
