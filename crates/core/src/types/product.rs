//! Catalog product.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A payload decoded but violated a value constraint.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Price is negative or not a finite number.
    #[error("product {id}: invalid price {price}")]
    InvalidPrice {
        /// Offending product.
        id: ProductId,
        /// Reported price.
        price: f64,
    },
    /// Rating is outside `0..=5`.
    #[error("product {id}: rating {rating} outside 0-5")]
    RatingOutOfRange {
        /// Offending product.
        id: ProductId,
        /// Reported rating.
        rating: f64,
    },
    /// Discount is outside `0..=100`.
    #[error("product {id}: discount {discount}% outside 0-100")]
    DiscountOutOfRange {
        /// Offending product.
        id: ProductId,
        /// Reported discount percentage.
        discount: f64,
    },
}

/// A product as served by `GET /products` and embedded in recommendations.
///
/// Immutable once fetched; a refetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Recommendation payloads may carry the raw document key `_id`.
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u64,
    /// Percent off; `0` when the product is not discounted.
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock_quantity: Option<u64>,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    /// Whether a discount badge should be shown.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Check the value constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: price must be finite and
    /// non-negative, rating within `0..=5`, discount within `0..=100`.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SchemaError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(SchemaError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(SchemaError::DiscountOutOfRange {
                id: self.id.clone(),
                discount: self.discount_percentage,
            });
        }
        Ok(())
    }
}
