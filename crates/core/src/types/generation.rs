//! Sample-data generation summary.

use serde::{Deserialize, Serialize};

/// Counts reported by `POST /generate-data`.
///
/// The contract only promises a 2xx; the body is optional extra detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub users_created: Option<u64>,
    #[serde(default)]
    pub products_created: Option<u64>,
    #[serde(default)]
    pub purchases_created: Option<u64>,
}

impl GenerationSummary {
    /// Parse a response body, returning `None` for empty or foreign bodies.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|summary| *summary != Self::default())
    }

    /// Short description of the counts, e.g. `1000 users, 1000 products`.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        let parts: Vec<String> = [
            (self.users_created, "users"),
            (self.products_created, "products"),
            (self.purchases_created, "purchases"),
        ]
        .into_iter()
        .filter_map(|(count, noun)| count.map(|n| format!("{n} {noun}")))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
