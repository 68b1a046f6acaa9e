//! Recommendations renderer.

use askama::Template;
use askama_web::WebTemplate;
use recdash_core::Recommendation;

use super::{Layout, ProductCardView};
use crate::store::Snapshot;

/// What the recommendations panel shows. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Loading,
    List,
    Empty,
}

impl PanelState {
    /// Busy wins over any list already on screen.
    #[must_use]
    pub const fn of(busy: bool, count: usize) -> Self {
        if busy {
            Self::Loading
        } else if count > 0 {
            Self::List
        } else {
            Self::Empty
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self == Self::Loading
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        *self == Self::List
    }
}

/// Recommendation card for templates.
#[derive(Debug, Clone)]
pub struct RecommendationCardView {
    pub rank: usize,
    pub product: ProductCardView,
    pub score: String,
}

impl RecommendationCardView {
    fn new(rank: usize, recommendation: &Recommendation) -> Self {
        Self {
            rank,
            product: ProductCardView::from(&recommendation.product),
            score: recommendation.score_display(),
        }
    }
}

/// Header panel describing whose recommendations are shown.
///
/// Only built when the requested user was in the list at the time.
#[derive(Debug, Clone)]
pub struct SelectedUserView {
    pub name: String,
    pub email: String,
    pub persona: String,
    pub recommendation_type: Option<String>,
    pub generated_at: Option<String>,
}

/// Entry in the user picker.
#[derive(Debug, Clone)]
pub struct UserOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Recommendations page template.
#[derive(Template, WebTemplate)]
#[template(path = "recommendations.html")]
pub struct RecommendationsTemplate {
    pub layout: Layout,
    pub panel: PanelState,
    pub selected: Option<SelectedUserView>,
    pub recommendations: Vec<RecommendationCardView>,
    pub user_options: Vec<UserOption>,
    pub busy: bool,
}

impl RecommendationsTemplate {
    pub(super) fn build(layout: Layout, snapshot: &Snapshot) -> Self {
        let selection = &snapshot.selection;
        let busy = snapshot.is_busy();

        let selected = selection.selected_user.as_ref().map(|user| SelectedUserView {
            name: user.name.clone(),
            email: user.email.clone(),
            persona: user.persona.label(),
            recommendation_type: selection.recommendation_type.clone(),
            generated_at: selection
                .generated_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
        });

        let recommendations = selection
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| RecommendationCardView::new(i + 1, rec))
            .collect();

        let user_options = snapshot
            .users
            .iter()
            .map(|user| UserOption {
                id: user.id.to_string(),
                name: user.name.clone(),
                selected: selection.user_id.as_ref() == Some(&user.id),
            })
            .collect();

        Self {
            layout,
            panel: PanelState::of(busy, selection.recommendations.len()),
            selected,
            recommendations,
            user_options,
            busy,
        }
    }
}
