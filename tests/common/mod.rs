//! Shared fixtures for router-level tests

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use party_game_gateway::app::{cors_layer, rate_limiter_for, router};
use party_game_gateway::cache::ResponseCache;
use party_game_gateway::gemini::{ContentModel, ModelError};
use party_game_gateway::generator::Generator;
use party_game_gateway::state::AppState;

/// Model stub that replays a script, then repeats its fallback text.
pub struct StubModel {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    script: Mutex<VecDeque<Result<String, ModelError>>>,
    fallback: String,
}

impl StubModel {
    pub fn returning(text: &str) -> Arc<Self> {
        Self::scripted(vec![], text)
    }

    pub fn scripted(script: Vec<Result<String, ModelError>>, fallback: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            fallback: fallback.to_string(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ContentModel for StubModel {
    async fn generate_content(&self, _system: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

pub fn server_error() -> Result<String, ModelError> {
    Err(ModelError::Api {
        status: 500,
        body: "internal".to_string(),
    })
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new(model: Option<Arc<StubModel>>, rate_limit: &str) -> Self {
        let model = model.map(|m| {
            let m: Arc<dyn ContentModel> = m;
            m
        });
        let cache = Arc::new(ResponseCache::new(100, Duration::from_secs(300)));
        let limiter = rate_limiter_for(rate_limit.parse().unwrap());
        let state = Arc::new(AppState::new(Generator::new(model, cache), limiter));
        Self {
            router: router(Arc::clone(&state), cors_layer(None)),
            state,
        }
    }

    pub fn with_model(model: &Arc<StubModel>) -> Self {
        Self::new(Some(Arc::clone(model)), "60/minute")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.post_from(uri, body, "127.0.0.1:40000").await
    }

    pub async fn post_from(&self, uri: &str, body: &str, client: &str) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let addr: SocketAddr = client.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.send(req).await
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = self.send_raw(req).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(req).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn send_raw(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }
}
