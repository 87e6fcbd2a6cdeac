#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use users_api::app::build_app;
use users_api::config::{DatabaseConfig, ServerConfig};
use users_api::state::AppState;
use users_core::types::DbId;
use users_db::models::user::{User, UserInput};
use users_db::{PersistenceError, UserGateway, UserOperation};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: "postgres://localhost/users_test".to_string(),
            max_connections: 1,
            connect_retry_secs: 1,
        },
    }
}

/// A pool that never connects: it is closed before use, so anything that
/// touches it (the health check) fails immediately.
pub async fn closed_pool() -> PgPool {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/users_unreachable")
        .unwrap();
    pool.close().await;
    pool
}

/// Full application router over the given gateway, using the same
/// middleware stack as production.
pub async fn build_test_app(users: Arc<dyn UserGateway>) -> Router {
    let state = AppState {
        pool: closed_pool().await,
        config: Arc::new(test_config()),
        users,
    };
    build_app(state)
}

/// Full application router over PostgreSQL.
pub fn build_pg_app(pool: PgPool) -> Router {
    build_app(AppState::new(pool, test_config()))
}

// ---------------------------------------------------------------------------
// In-memory gateway
// ---------------------------------------------------------------------------

/// `UserGateway` backed by a map, with optional failure injection and a
/// call counter for asserting that validation short-circuits the store.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<BTreeMap<DbId, User>>,
    last_id: Mutex<DbId>,
    calls: AtomicUsize,
    failing: bool,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails with a pool timeout wrapped for its operation.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn enter(&self, operation: UserOperation) -> Result<(), PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(PersistenceError::new(operation, sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserGateway for InMemoryUsers {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, PersistenceError> {
        self.enter(UserOperation::Fetch)?;
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, input: &UserInput) -> Result<User, PersistenceError> {
        self.enter(UserOperation::Create)?;
        let id = {
            let mut last = self.last_id.lock().unwrap();
            *last += 1;
            *last
        };
        let now = chrono::Utc::now();
        let user = User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: DbId, input: &UserInput) -> Result<Option<User>, PersistenceError> {
        self.enter(UserOperation::Update)?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|user| {
            user.name = input.name.clone();
            user.email = input.email.clone();
            user.role = input.role.clone();
            user.updated_at = chrono::Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, PersistenceError> {
        self.enter(UserOperation::Delete)?;
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, PersistenceError> {
        self.enter(UserOperation::List)?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_raw(app, Method::PUT, uri, body.to_string()).await
}

/// Send an arbitrary string as a JSON-typed body.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn john_doe() -> serde_json::Value {
    serde_json::json!({
        "name": "John Doe",
        "email": "john@example.com",
        "role": "Admin"
    })
}
