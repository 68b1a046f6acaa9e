//! In-memory [`CatalogApi`] and fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use recdash_core::{
    GenerationSummary, Persona, Product, ProductId, Recommendation, RecommendationSet, User,
    UserId,
};
use reqwest::StatusCode;
use tokio::sync::Semaphore;

use crate::api::{ApiError, CatalogApi};

/// Holds fake calls open until the test opens it.
#[derive(Debug, Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn closed() -> Self {
        Self(Arc::new(Semaphore::new(0)))
    }

    /// Release every current and future waiter.
    pub fn open(&self) {
        self.0.close();
    }

    async fn pass(gate: Option<&Self>) {
        if let Some(gate) = gate {
            // Only resolves with an error once the gate is closed for good.
            let _ = gate.0.acquire().await;
        }
    }
}

/// Number of calls per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_users: usize,
    pub list_products: usize,
    pub get_recommendations: usize,
    pub generate_sample_data: usize,
}

impl CallCounts {
    pub const fn total(&self) -> usize {
        self.list_users + self.list_products + self.get_recommendations + self.generate_sample_data
    }
}

#[derive(Debug, Default)]
struct Catalog {
    users: Option<Vec<User>>,
    products: Option<Vec<Product>>,
    recommendations: HashMap<UserId, RecommendationSet>,
    generated: Option<(Vec<User>, Vec<Product>)>,
    summary: Option<GenerationSummary>,
    generation_fails: bool,
    last_limit: Option<usize>,
}

/// Scriptable backend. Missing lists and unknown users answer with an error
/// status, like the real service.
#[derive(Debug, Default)]
pub struct FakeApi {
    catalog: Mutex<Catalog>,
    user_gate: Option<Gate>,
    recommendation_gate: Option<Gate>,
    generation_gate: Option<Gate>,
    list_users: AtomicUsize,
    list_products: AtomicUsize,
    get_recommendations: AtomicUsize,
    generate_sample_data: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.set_users(Some(users));
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.catalog.lock().unwrap().products = Some(products);
        self
    }

    pub fn with_recommendations(self, user_id: &str, set: RecommendationSet) -> Self {
        self.catalog
            .lock()
            .unwrap()
            .recommendations
            .insert(UserId::new(user_id), set);
        self
    }

    /// Catalog that replaces the current lists when generation succeeds.
    pub fn with_generated_catalog(self, users: Vec<User>, products: Vec<Product>) -> Self {
        self.catalog.lock().unwrap().generated = Some((users, products));
        self
    }

    pub fn with_generation_summary(self, summary: GenerationSummary) -> Self {
        self.catalog.lock().unwrap().summary = Some(summary);
        self
    }

    pub fn failing_generation(self) -> Self {
        self.catalog.lock().unwrap().generation_fails = true;
        self
    }

    pub fn with_user_gate(mut self, gate: Gate) -> Self {
        self.user_gate = Some(gate);
        self
    }

    pub fn with_recommendation_gate(mut self, gate: Gate) -> Self {
        self.recommendation_gate = Some(gate);
        self
    }

    pub fn with_generation_gate(mut self, gate: Gate) -> Self {
        self.generation_gate = Some(gate);
        self
    }

    /// Replace the user list; `None` makes `list_users` fail.
    pub fn set_users(&self, users: Option<Vec<User>>) {
        self.catalog.lock().unwrap().users = users;
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list_users: self.list_users.load(Ordering::SeqCst),
            list_products: self.list_products.load(Ordering::SeqCst),
            get_recommendations: self.get_recommendations.load(Ordering::SeqCst),
            generate_sample_data: self.generate_sample_data.load(Ordering::SeqCst),
        }
    }

    pub fn last_limit(&self) -> Option<usize> {
        self.catalog.lock().unwrap().last_limit
    }
}

fn unavailable(path: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        url: format!("http://fake{path}"),
    }
}

impl CatalogApi for FakeApi {
    async fn list_users(&self, limit: usize) -> Result<Vec<User>, ApiError> {
        self.list_users.fetch_add(1, Ordering::SeqCst);
        Gate::pass(self.user_gate.as_ref()).await;
        let mut catalog = self.catalog.lock().unwrap();
        catalog.last_limit = Some(limit);
        let mut users = catalog.users.clone().ok_or_else(|| unavailable("/users"))?;
        users.truncate(limit);
        Ok(users)
    }

    async fn list_products(&self, limit: usize) -> Result<Vec<Product>, ApiError> {
        self.list_products.fetch_add(1, Ordering::SeqCst);
        let mut catalog = self.catalog.lock().unwrap();
        catalog.last_limit = Some(limit);
        let mut products = catalog
            .products
            .clone()
            .ok_or_else(|| unavailable("/products"))?;
        products.truncate(limit);
        Ok(products)
    }

    async fn get_recommendations(&self, user_id: &UserId) -> Result<RecommendationSet, ApiError> {
        self.get_recommendations.fetch_add(1, Ordering::SeqCst);
        Gate::pass(self.recommendation_gate.as_ref()).await;
        let set = self
            .catalog
            .lock()
            .unwrap()
            .recommendations
            .get(user_id)
            .cloned();
        set.ok_or_else(|| ApiError::Status {
            status: StatusCode::NOT_FOUND,
            url: format!("http://fake/recommendations/{user_id}"),
        })
    }

    async fn generate_sample_data(&self) -> Result<Option<GenerationSummary>, ApiError> {
        self.generate_sample_data.fetch_add(1, Ordering::SeqCst);
        Gate::pass(self.generation_gate.as_ref()).await;
        let mut catalog = self.catalog.lock().unwrap();
        if catalog.generation_fails {
            return Err(unavailable("/generate-data"));
        }
        if let Some((users, products)) = catalog.generated.take() {
            catalog.users = Some(users);
            catalog.products = Some(products);
        }
        Ok(catalog.summary.clone())
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age: 34,
        gender: "female".to_string(),
        persona: Persona::TechEnthusiast,
        total_purchases: 12,
        total_spent: 1520.5,
        location: Some("Seattle".to_string()),
        income_level: None,
        interests: vec!["gadgets".to_string()],
        favorite_categories: vec!["Electronics".to_string()],
    }
}

pub fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: "Acme".to_string(),
        category: "Home".to_string(),
        price,
        rating: 4.5,
        review_count: 128,
        discount_percentage: 0.0,
        subcategory: None,
        description: None,
        tags: Vec::new(),
        stock_quantity: Some(7),
        is_featured: false,
    }
}

pub fn recommendation_set(items: Vec<(Product, f64)>) -> RecommendationSet {
    RecommendationSet {
        recommendations: items
            .into_iter()
            .map(|(product, score)| Recommendation { product, score })
            .collect(),
        recommendation_type: Some("hybrid".to_string()),
        generated_at: None,
    }
}
