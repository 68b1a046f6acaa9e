//! HTTP implementation of [`CatalogApi`].

use recdash_core::{GenerationSummary, Product, RecommendationSet, User, UserId};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{ApiError, CatalogApi};
use crate::config::ApiConfig;

/// Recommendation service client.
///
/// Cheap to clone; all clones share one connection pool. Every request
/// targets the configured base origin and is attempted exactly once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured origin.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// The origin requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn list_endpoint(&self, resource: &str, limit: usize) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&[resource])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;
        let body = success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CatalogApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_users(&self, limit: usize) -> Result<Vec<User>, ApiError> {
        let url = self.list_endpoint("users", limit)?;
        let users: Vec<User> = self.get_json(url).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(cap_to_limit(users, limit, "users"))
    }

    #[instrument(skip(self))]
    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, ApiError> {
        let url = self.list_endpoint("products", limit)?;
        let products: Vec<Product> =
            cap_to_limit(self.get_json(url).await?, limit, "products");
        products.iter().try_for_each(Product::validate)?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn get_recommendations(&self, user_id: &UserId) -> Result<RecommendationSet, ApiError> {
        let url = self.endpoint(&["recommendations", user_id.as_str()])?;
        let set: RecommendationSet = self.get_json(url).await?;
        set.validate()?;
        debug!(
            count = set.recommendations.len(),
            recommendation_type = ?set.recommendation_type,
            "Fetched recommendations"
        );
        Ok(set)
    }

    #[instrument(skip(self))]
    async fn generate_sample_data(&self) -> Result<Option<GenerationSummary>, ApiError> {
        let url = self.endpoint(&["generate-data"])?;
        let response = self.client.post(url).send().await?;
        let body = success_body(response).await?;
        let summary = GenerationSummary::from_body(&body);
        debug!(?summary, "Sample data generated");
        Ok(summary)
    }
}

/// Read the body of a 2xx response; anything else is an error.
async fn success_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let url = response.url().to_string();
        debug!(%status, %url, "Recommendation service returned an error status");
        return Err(ApiError::Status { status, url });
    }
    Ok(response.text().await?)
}

/// Enforce the `limit` the service was asked for.
fn cap_to_limit<T>(mut items: Vec<T>, limit: usize, resource: &'static str) -> Vec<T> {
    if items.len() > limit {
        warn!(
            resource,
            received = items.len(),
            limit,
            "Recommendation service ignored the limit, truncating"
        );
        items.truncate(limit);
    }
    items
}
