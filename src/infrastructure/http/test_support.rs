//! 测试用的进程内后端
//!
//! axum 路由绑定到 127.0.0.1 的随机端口，记录收到的每个请求，
//! 并由测试提供的闭包决定响应。

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{self, HeaderMap, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// 记录下来的请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// 模拟响应
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }

    /// 不带 Content-Type
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: None,
            body: body.to_string(),
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: body.to_string(),
        }
    }
}

type Responder = Box<dyn Fn(&RecordedRequest) -> MockResponse + Send + Sync>;

struct MockState {
    responder: Responder,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockBackend {
    base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        let state = Arc::new(MockState {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn record(State(state): State<Arc<MockState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        headers: parts.headers,
        body: body.to_vec(),
    };

    let reply = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);

    let mut builder = http::Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    if let Some(content_type) = reply.content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(reply.body)).unwrap()
}

/// 构造只含 `exp` 的未签名 JWT
pub fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, exp).as_bytes());
    format!("{}.{}.c2lnbmF0dXJl", header, payload)
}

pub fn fresh_token() -> String {
    token_with_exp((Utc::now() + Duration::hours(1)).timestamp())
}

pub fn expired_token() -> String {
    token_with_exp((Utc::now() - Duration::minutes(5)).timestamp())
}
