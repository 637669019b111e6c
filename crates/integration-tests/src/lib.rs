//! Integration tests for QuickBite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickbite-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_*` - JSON API driven in-process through the router
//! - `persistence` - Cart state surviving a restart on the file store
//!
//! The helpers here build an [`AppState`] without binding a socket and send
//! requests with `tower::ServiceExt::oneshot`.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use quickbite_core::Price;
use quickbite_storefront::config::StorefrontConfig;
use quickbite_storefront::routes;
use quickbite_storefront::state::AppState;
use quickbite_storefront::store::{KvStore, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

/// Configuration used by tests: $2.99 delivery, 3 second tracking ticks.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|_| None).unwrap()
}

/// An in-process storefront.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App backed by `store`. Persisted state is not loaded.
    #[must_use]
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let state = AppState::new(test_config(), store);
        let router = routes::app(state.clone());
        Self { state, router }
    }

    /// Send a request and return the status and parsed JSON body.
    ///
    /// Non-JSON bodies come back as a JSON string.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a JSON number into a [`Price`] for exact comparison.
#[must_use]
pub fn price(value: &Value) -> Price {
    serde_json::from_value(value.clone()).unwrap()
}

/// One tracking interval of [`test_config`].
pub const TICK: Duration = Duration::from_secs(3);
