//! # Mock Transport
//!
//! A scripted [`Transport`] for tests: responses are registered per method and path, every
//! request is logged, and a response can be delayed or held behind a [`Gate`] to control
//! exactly when it resolves.
//!
//! ```rust
//! use bakery_miniapp::api::mock::MockTransport;
//! use bakery_miniapp::api::{ApiClient, Method};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockTransport::new());
//!     mock.on(Method::Get, "/categories")
//!         .respond_ok(json!([{"id": "c1", "name": "Cakes"}]));
//!
//!     let api = ApiClient::new(mock.clone(), None);
//!     assert_eq!(api.get_categories().await.unwrap().len(), 1);
//!     assert_eq!(mock.count(Method::Get, "/categories"), 1);
//! }
//! ```
//!
//! A full path (`/products?categoryId=c1`) is matched before the bare route
//! (`/products`). Scripted responses for one key are consumed in order and the last one
//! repeats. An unscripted request fails with HTTP 404.

use crate::api::error::TransportError;
use crate::api::transport::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Holds a scripted response until [`Gate::open`] is called.
#[derive(Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Lets every held and future response through.
    pub fn open(&self) {
        self.permits.close();
    }

    async fn wait(&self) {
        // A closed semaphore fails every acquire, which is what releases the waiters.
        let _ = self.permits.acquire().await;
    }
}

#[derive(Clone)]
struct Scripted {
    result: Result<String, TransportError>,
    delay: Option<Duration>,
    gate: Option<Gate>,
}

type Key = (Method, String);

#[derive(Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<Key, VecDeque<Scripted>>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts scripting the response for `method` on `path`.
    pub fn on(&self, method: Method, path: &str) -> ResponseBuilder<'_> {
        ResponseBuilder {
            mock: self,
            key: (method, path.to_string()),
            delay: None,
            gate: None,
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.log.lock().unwrap().last().cloned()
    }

    /// Requests sent for `method` on `route` (query string ignored).
    pub fn count(&self, method: Method, route: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.route() == route)
            .count()
    }

    /// Number of `POST` requests sent so far.
    pub fn writes(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == Method::Post)
            .count()
    }

    fn push(&self, key: Key, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(scripted);
    }

    fn next_for(&self, request: &ApiRequest) -> Option<Scripted> {
        let mut scripts = self.scripts.lock().unwrap();
        let full = (request.method, request.path.clone());
        let bare = (request.method, request.route().to_string());
        let queue = if scripts.contains_key(&full) {
            scripts.get_mut(&full)
        } else {
            scripts.get_mut(&bare)
        }?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, TransportError> {
        self.log.lock().unwrap().push(request.clone());

        let Some(scripted) = self.next_for(&request) else {
            return Err(TransportError::Status {
                status: 404,
                body: format!("no script for {} {}", request.method, request.path),
            });
        };
        if let Some(gate) = &scripted.gate {
            gate.wait().await;
        }
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

pub struct ResponseBuilder<'a> {
    mock: &'a MockTransport,
    key: Key,
    delay: Option<Duration>,
    gate: Option<Gate>,
}

impl ResponseBuilder<'_> {
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn held(mut self, gate: &Gate) -> Self {
        self.gate = Some(gate.clone());
        self
    }

    /// `{"success": true, "data": data}`
    pub fn respond_ok(self, data: Value) {
        self.respond_raw(json!({ "success": true, "data": data }).to_string());
    }

    /// `{"success": false, "error": message}`
    pub fn respond_rejected(self, message: &str) {
        self.respond_raw(json!({ "success": false, "error": message }).to_string());
    }

    pub fn respond_raw(self, body: impl Into<String>) {
        self.finish(Ok(body.into()));
    }

    pub fn fail(self, error: TransportError) {
        self.finish(Err(error));
    }

    fn finish(self, result: Result<String, TransportError>) {
        self.mock.push(
            self.key,
            Scripted {
                result,
                delay: self.delay,
                gate: self.gate,
            },
        );
    }
}
