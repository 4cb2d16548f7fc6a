use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use paranuara::import::{import_companies, import_people};
use paranuara::server::{AppState, create_router};
use paranuara::store::{SqliteStore, Store};

/// The API router over a throwaway database, driven in-process.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub store: Arc<SqliteStore>,
    router: Router,
}

fn records(value: Value) -> Vec<serde_json::Map<String, Value>> {
    value
        .as_array()
        .expect("array of records")
        .iter()
        .map(|v| v.as_object().expect("record object").clone())
        .collect()
}

impl TestServer {
    pub fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("paranuara.db")).expect("open store");
        store.initialize().expect("initialize store");

        let store = Arc::new(store);
        let router = create_router(Arc::new(AppState::new(store.clone())));

        Self {
            temp_dir,
            store,
            router,
        }
    }

    pub fn import(&self, companies: Value, people: Value) {
        import_companies(self.store.as_ref(), &records(companies)).expect("import companies");
        import_people(self.store.as_ref(), &records(people)).expect("import people");
    }

    pub async fn request(&self, method: Method, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path).await
    }
}
