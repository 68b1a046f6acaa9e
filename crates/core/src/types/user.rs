//! Catalog user.

use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::persona::Persona;

/// A user as served by `GET /users`.
///
/// Immutable once fetched; the dashboard never edits a user in place, it
/// only replaces the whole list on refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    #[serde(rename = "persona_type")]
    pub persona: Persona,
    #[serde(default)]
    pub total_purchases: u64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub income_level: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub favorite_categories: Vec<String>,
}

impl User {
    /// Find a user by id in a fetched list.
    #[must_use]
    pub fn find<'a>(users: &'a [Self], id: &UserId) -> Option<&'a Self> {
        users.iter().find(|user| &user.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ana() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "name": "Ana",
            "email": "ana@example.com",
            "age": 34,
            "gender": "female",
            "persona_type": "budget_conscious",
            "total_purchases": 3,
            "total_spent": 120.5
        })
    }

    #[test]
    fn test_decode_user() {
        let user: User = serde_json::from_value(ana()).unwrap();
        assert_eq!(user.id, UserId::new("1"));
        assert_eq!(user.persona, Persona::BudgetConscious);
        assert_eq!(user.total_purchases, 3);
        assert!(user.interests.is_empty());
        assert!(user.location.is_none());
    }

    #[test]
    fn test_decode_backend_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "name": "Bo",
            "email": "bo@example.com",
            "age": 51,
            "gender": "male",
            "location": "Lisbon",
            "income_level": "high",
            "interests": ["gadgets"],
            "persona_type": "tech_enthusiast",
            "total_purchases": 0,
            "total_spent": 0.0,
            "favorite_categories": [],
            "created_at": "2024-03-01T10:00:00",
            "last_login": null
        }))
        .unwrap();
        assert_eq!(user.location.as_deref(), Some("Lisbon"));
        assert_eq!(user.interests, vec!["gadgets".to_string()]);
    }

    #[test]
    fn test_missing_persona_fails() {
        let mut value = ana();
        value.as_object_mut().unwrap().remove("persona_type");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_find() {
        let users = vec![serde_json::from_value::<User>(ana()).unwrap()];
        assert_eq!(
            User::find(&users, &UserId::new("1")).map(|u| u.name.as_str()),
            Some("Ana")
        );
        assert!(User::find(&users, &UserId::new("999")).is_none());
    }
}
