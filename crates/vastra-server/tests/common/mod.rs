//! Shared harness: an in-memory app wired to a temp data dir.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vastra_chat::LLMConfig;
use vastra_core::VastraConfig;
use vastra_server::{build_router, AppState, Endpoints};
use vastra_store::UserStore;

pub const BOUNDARY: &str = "vastra-test-boundary";

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(&[], Endpoints::default())
    }

    /// Build the app from `vars` only; the process environment is ignored.
    pub fn with_env(vars: &[(&str, &str)], endpoints: Endpoints) -> Self {
        let dir = TempDir::new().unwrap();
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let config = VastraConfig::from_lookup(dir.path(), |k| vars.get(k).cloned()).unwrap();

        let llm_path = config.data_paths.llm_config_file.clone();
        let state = AppState::new(config, UserStore::open_in_memory().unwrap())
            .unwrap()
            .with_endpoints(endpoints);
        // Drop any provider keys picked up from the environment
        *state.llm_config.write() = LLMConfig {
            config_path: llm_path,
            ..Default::default()
        };

        let state = Arc::new(state);
        Self {
            router: build_router(state.clone()),
            state,
            _dir: dir,
        }
    }

    /// Point the LLM at a Groq-compatible mock.
    pub fn use_llm(&self, base_url: &str) {
        let mut config = self.state.llm_config.write();
        config.groq_api_key = Some("gsk-test".into());
        config.base_url = Some(base_url.to_string());
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes.to_vec())
    }

    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, _, bytes) = self.send(req).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::POST, uri, Some(body)).await
    }

    /// POST a multipart form with an optional `file` part.
    pub async fn upload(&self, uri: &str, file: Option<&[u8]>, fields: &[(&str, &str)]) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
            .body(Body::from(multipart_body(file, fields)))
            .unwrap();
        let (status, _, bytes) = self.send(req).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

pub fn multipart_body(file: Option<&[u8]>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// SSE body a Groq-style endpoint streams back for `tokens`.
pub fn sse_tokens(tokens: &[&str]) -> String {
    let mut body = String::new();
    for token in tokens {
        let chunk = serde_json::json!({ "choices": [{ "delta": { "content": token } }] });
        body.push_str(&format!("data: {}\n", chunk));
    }
    body.push_str("data: [DONE]\n");
    body
}

pub fn measurements() -> Value {
    serde_json::json!({
        "height": 170.0,
        "weight": 65.0,
        "shoulder_width": 42.0,
        "chest": 92.0,
        "waist": 76.0,
        "hip": 96.0,
        "arm_length": 60.0,
        "inseam": 78.0
    })
}
