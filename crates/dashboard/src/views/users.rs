//! Users renderer.

use askama::Template;
use askama_web::WebTemplate;
use recdash_core::User;

use super::{Layout, format_price};
use crate::store::Snapshot;

/// User card for templates.
#[derive(Debug, Clone)]
pub struct UserCardView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub persona: String,
    pub total_purchases: u64,
    pub total_spent: String,
    pub location: Option<String>,
    pub interests: Option<String>,
    /// Form target that requests this user's recommendations.
    pub recommend_action: String,
    /// Whether this user owns the current selection.
    pub selected: bool,
}

impl From<&User> for UserCardView {
    fn from(user: &User) -> Self {
        let interests = (!user.interests.is_empty()).then(|| user.interests.join(", "));
        let id = user.id.to_string();
        Self {
            recommend_action: format!("/users/{}/recommendations", encode_segment(&id)),
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            gender: user.gender.clone(),
            persona: user.persona.label(),
            total_purchases: user.total_purchases,
            total_spent: format_price(user.total_spent),
            location: user.location.clone(),
            interests,
            selected: false,
        }
    }
}

/// Users page template.
#[derive(Template, WebTemplate)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub layout: Layout,
    pub users: Vec<UserCardView>,
    /// Actions are disabled while backend work is in flight.
    pub busy: bool,
}

impl UsersTemplate {
    pub(super) fn build(layout: Layout, snapshot: &Snapshot) -> Self {
        let selected = snapshot.selection.user_id.as_ref();
        let users = snapshot
            .users
            .iter()
            .map(|user| UserCardView {
                selected: selected == Some(&user.id),
                ..UserCardView::from(user)
            })
            .collect();

        Self {
            layout,
            users,
            busy: snapshot.is_busy(),
        }
    }
}

/// Percent-encode one path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
