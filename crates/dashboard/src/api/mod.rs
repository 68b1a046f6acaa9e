//! Recommendation service API client.
//!
//! Four request/response operations against the backend, with no state shared
//! between calls and no retries:
//!
//! ```text
//! GET  /users?limit=N                 list users
//! GET  /products?limit=N              list products
//! GET  /recommendations/{user_id}     recommendations for one user
//! POST /generate-data                 (re)populate the catalog
//! ```
//!
//! Every failure surfaces as an [`ApiError`]. The variants keep the cause
//! visible in logs, but callers treat them all as one transport failure.

mod client;

use std::future::Future;

use recdash_core::{GenerationSummary, Product, RecommendationSet, SchemaError, User, UserId};
use thiserror::Error;

pub use client::ApiClient;

/// Errors that can occur when calling the recommendation service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or protocol failure before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{url} returned {status}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Body was not the declared JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Body decoded but carried out-of-range values.
    #[error("Invalid payload: {0}")]
    Schema(#[from] SchemaError),

    /// Request URL could not be built.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the response arrived but did not match the expected schema.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Schema(_))
    }

    /// HTTP status, when the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}

/// The operations the state store needs from the recommendation service.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait CatalogApi: Send + Sync + 'static {
    /// Fetch at most `limit` users, in backend order.
    fn list_users(&self, limit: usize)
    -> impl Future<Output = Result<Vec<User>, ApiError>> + Send;

    /// Fetch at most `limit` products, in backend order.
    fn list_products(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch the recommendations for one user.
    ///
    /// An unknown user and a transient failure are indistinguishable here.
    fn get_recommendations(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<RecommendationSet, ApiError>> + Send;

    /// Ask the service to (re)generate its sample catalog.
    ///
    /// Resolves to the parsed summary when the body carries one.
    fn generate_sample_data(
        &self,
    ) -> impl Future<Output = Result<Option<GenerationSummary>, ApiError>> + Send;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            url: "http://localhost:8000/recommendations/999".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:8000/recommendations/999 returned 400 Bad Request"
        );
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
        assert!(!err.is_parse());
    }

    #[test]
    fn test_parse_errors_are_distinguishable() {
        let err = ApiError::from(serde_json::from_str::<Vec<User>>("{").unwrap_err());
        assert!(err.is_parse());
        assert!(err.status().is_none());
    }
}
