//! Recommendation results.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::product::{Product, SchemaError};

/// One recommended product with its relevance score.
///
/// Higher scores are more relevant; the range is whatever the backend's
/// strategy produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    pub score: f64,
}

impl Recommendation {
    /// Score rendered with exactly two decimals.
    #[must_use]
    pub fn score_display(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Body of `GET /recommendations/{user_id}`.
///
/// Order of `recommendations` is significant and kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Strategy the backend used (`personalized`, `persona_based`, ...).
    #[serde(default)]
    pub recommendation_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl RecommendationSet {
    /// Validate every embedded product.
    ///
    /// # Errors
    ///
    /// Returns the first product constraint violation.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.recommendations
            .iter()
            .try_for_each(|rec| rec.product.validate())
    }
}

/// Parse a timestamp that may be RFC 3339 or a naive ISO datetime (assumed UTC).
///
/// Anything unparseable becomes `None`; the timestamp is informational only.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse_timestamp))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
