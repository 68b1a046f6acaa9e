//! Integration tests for the recommendation dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p recdash-integration-tests
//! ```
//!
//! Nothing external is required: [`TestBackend`] stands in for the
//! recommendation service on a loopback port, and [`spawn_dashboard`] serves
//! the real dashboard router against it.
//!
//! # Test Categories
//!
//! - `api_client` - HTTP contract of the API client
//! - `dashboard` - End-to-end requests against the served dashboard

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use recdash_dashboard::api::ApiClient;
use recdash_dashboard::config::ApiConfig;
use recdash_dashboard::routes;
use recdash_dashboard::state::AppState;
use recdash_dashboard::store::Store;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct BackendState {
    routes: HashMap<String, Canned>,
    requests: Vec<String>,
    ignore_limit: bool,
}

/// Fake recommendation service with canned responses.
///
/// Responses are keyed by method and raw (still percent-encoded) path, e.g.
/// `GET /recommendations/1`. Unknown routes answer 404 like the real
/// service does for unknown users. List bodies are truncated to the `limit`
/// query parameter unless [`TestBackend::ignore_limit`] is set.
#[derive(Debug, Clone)]
pub struct TestBackend {
    base_url: String,
    state: Arc<Mutex<BackendState>>,
}

impl TestBackend {
    /// Start the backend on a free loopback port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(BackendState::default()));
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&state));
        let addr = serve(app).await;

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Origin the backend listens on.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer `method path` with `status` and a raw body.
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.state.lock().unwrap().routes.insert(
            format!("{method} {path}"),
            Canned {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Answer `method path` with 200 and a JSON body.
    pub fn respond_json(&self, method: &str, path: &str, body: &Value) -> &Self {
        self.respond_raw(method, path, 200, &body.to_string())
    }

    /// Hold responses for `method path` for `delay` before answering.
    pub fn delay(&self, method: &str, path: &str, delay: Duration) -> &Self {
        if let Some(canned) = self
            .state
            .lock()
            .unwrap()
            .routes
            .get_mut(&format!("{method} {path}"))
        {
            canned.delay = Some(delay);
        }
        self
    }

    /// Return full lists regardless of the requested limit.
    pub fn ignore_limit(&self) -> &Self {
        self.state.lock().unwrap().ignore_limit = true;
        self
    }

    /// Requests received so far, as `METHOD path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests received for `method path`, ignoring the query.
    pub fn count(&self, method: &str, path: &str) -> usize {
        let key = format!("{method} {path}");
        self.requests()
            .iter()
            .filter(|r| r.split('?').next() == Some(key.as_str()))
            .count()
    }
}

async fn respond(
    State(state): State<Arc<Mutex<BackendState>>>,
    method: Method,
    uri: Uri,
) -> Response {
    let key = format!("{method} {}", uri.path());
    let (canned, ignore_limit) = {
        let mut state = state.lock().unwrap();
        state.requests.push(match uri.query() {
            Some(query) => format!("{key}?{query}"),
            None => key.clone(),
        });
        (state.routes.get(&key).cloned(), state.ignore_limit)
    };

    let Some(canned) = canned else {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            json!({"detail": "Not found"}).to_string(),
        )
            .into_response();
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let limit = uri
        .query()
        .and_then(|q| q.strip_prefix("limit="))
        .and_then(|n| n.parse::<usize>().ok());
    let body = match limit {
        Some(limit) if !ignore_limit => truncate_array(canned.body, limit),
        _ => canned.body,
    };

    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

fn truncate_array(body: String, limit: usize) -> String {
    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Array(mut items)) => {
            items.truncate(limit);
            Value::Array(items).to_string()
        }
        _ => body,
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A dashboard served on a loopback port.
pub struct Dashboard {
    pub url: String,
    pub store: Store<ApiClient>,
    /// Client that does not follow redirects.
    pub client: reqwest::Client,
}

impl Dashboard {
    /// GET `path` and return status and body.
    pub async fn get(&self, path: &str) -> (u16, String) {
        let response = self
            .client
            .get(format!("{}{path}", self.url))
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    /// POST `path` with an optional url-encoded form body.
    pub async fn post(&self, path: &str, form: Option<&str>) -> reqwest::Response {
        let request = self.client.post(format!("{}{path}", self.url));
        let request = match form {
            Some(body) => request
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(body.to_string()),
            None => request,
        };
        request.send().await.unwrap()
    }

    /// Wait until no backend work is in flight.
    pub async fn wait_idle(&self) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.store.is_busy() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }
}

/// Serve the dashboard against `backend` with the given fetch limit.
pub async fn spawn_dashboard(backend: &TestBackend, fetch_limit: usize) -> Dashboard {
    let mut config = ApiConfig::new(backend.base_url()).unwrap();
    config.fetch_limit = fetch_limit;
    let store = Store::new(ApiClient::new(&config).unwrap(), fetch_limit);
    let addr = serve(routes::app(AppState::new(store.clone()))).await;

    Dashboard {
        url: format!("http://{addr}"),
        store,
        client: reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap(),
    }
}

/// A user object as the recommendation service returns it.
pub fn user_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "age": 29,
        "gender": "female",
        "persona_type": "budget_conscious",
        "total_purchases": 4,
        "total_spent": 210.4,
        "location": "Austin",
        "interests": ["cooking", "travel"]
    })
}

/// A product object as the recommendation service returns it.
pub fn product_json(id: u64, name: &str, price: f64, discount: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "brand": "Acme",
        "category": "Kitchen",
        "subcategory": "Drinkware",
        "price": price,
        "rating": 4.2,
        "review_count": 87,
        "discount_percentage": discount,
        "stock_quantity": 12,
        "is_featured": false
    })
}
