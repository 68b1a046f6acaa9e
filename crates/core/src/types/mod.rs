//! Core types for the recommendation dashboard.
//!
//! This module provides type-safe wrappers for the catalog and recommendation
//! concepts served by the backend.

pub mod generation;
pub mod id;
pub mod persona;
pub mod product;
pub mod recommendation;
pub mod user;
pub mod view;

pub use generation::GenerationSummary;
pub use id::*;
pub use persona::Persona;
pub use product::{Product, SchemaError};
pub use recommendation::{Recommendation, RecommendationSet};
pub use user::User;
pub use view::{ParseViewError, View};
