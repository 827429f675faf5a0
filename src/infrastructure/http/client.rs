//! API Client - 后端 REST 调用的唯一出口
//!
//! 负责：
//! - 读取存储的令牌，本地检查过期时间后附加 `Authorization: Bearer`
//! - 请求体序列化与 Content-Type 默认值
//! - 非 2xx 响应分类；会话失效时清除凭证并跳转登录页
//! - 成功响应按 信封 → JSON → 数字 → 文本 解码
//!
//! 不做重试、退避、去重，也不主动设置超时（除非配置了 `timeout_secs`）。

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::body::RequestBody;
use super::failure::classify_failure;
use super::payload::Payload;
use crate::application::ports::{CredentialStorePort, NavigatorPort, AUTH_TOKEN_KEY};
use crate::application::{ApiError, SessionFailure};
use crate::domain::session::AccessToken;

/// API 客户端配置
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// 后端基础 URL，启动时按环境选定
    pub base_url: String,
    /// 401 时跳转的登录页路径
    pub login_path: String,
    /// 请求超时时间（秒），`None` 表示使用传输层默认行为
    pub timeout_secs: Option<u64>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1111".to_string(),
            login_path: "/login".to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// API 客户端
///
/// 由组合根构建一次，通过 `Arc` 共享给所有服务。
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    credentials: Arc<dyn CredentialStorePort>,
    navigator: Arc<dyn NavigatorPort>,
}

impl ApiClient {
    pub fn new(
        config: ApiClientConfig,
        credentials: Arc<dyn CredentialStorePort>,
        navigator: Arc<dyn NavigatorPort>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            credentials,
            navigator,
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStorePort> {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, RequestBody::Empty, HeaderMap::new())
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, body.into(), HeaderMap::new())
            .await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, body.into(), HeaderMap::new())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, RequestBody::Empty, HeaderMap::new())
            .await
    }

    /// 通用请求，允许调用方附加请求头
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<T, ApiError> {
        self.send(method, path, body, headers).await?.into_typed()
    }

    /// 发送请求并返回未转换类型的响应
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<Payload, ApiError> {
        // 本地令牌检查失败时不发起网络请求
        let token = self.authorize()?;

        let mut headers = body.prepare_headers(headers)?;
        if let Some(token) = &token {
            let value = HeaderValue::from_str(&token.bearer())
                .map_err(|e| ApiError::invalid_request(format!("Invalid token header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let url = self.url(path);
        tracing::debug!(
            method = %method,
            url = %url,
            authenticated = token.is_some(),
            "Sending API request"
        );

        let builder = self.client.request(method.clone(), &url).headers(headers);
        let response = body
            .attach(builder)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response body: {}", e)))?;

        if status.is_success() {
            return Ok(Payload::decode(&text));
        }

        let error = classify_failure(status, &text);
        tracing::warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            error = %error,
            "API request failed"
        );
        if let ApiError::Session { reason, .. } = &error {
            self.end_session(*reason);
        }
        Err(error)
    }

    /// 读取令牌并做本地过期检查
    ///
    /// 没有令牌时以未认证身份继续；令牌过期或无法解码时清除凭证并失败。
    fn authorize(&self) -> Result<Option<AccessToken>, ApiError> {
        let raw = match self.credentials.get(AUTH_TOKEN_KEY)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(None),
        };

        match AccessToken::new(raw).and_then(|token| token.ensure_fresh().map(|_| token)) {
            Ok(token) => Ok(Some(token)),
            Err(err) => {
                tracing::warn!(error = %err, "Stored access token rejected locally");
                self.clear_credentials();
                Err(err.into())
            }
        }
    }

    fn end_session(&self, reason: SessionFailure) {
        self.clear_credentials();
        if reason.is_server_confirmed() {
            self.redirect_to_login();
        }
    }

    fn clear_credentials(&self) {
        match self.credentials.clear_session() {
            Ok(()) => tracing::warn!("Session credentials cleared"),
            Err(e) => tracing::error!(error = %e, "Failed to clear session credentials"),
        }
    }

    /// 已经在登录相关页面时不跳转，避免循环
    fn redirect_to_login(&self) {
        let current = self.navigator.current_path();
        if current.contains("login") {
            tracing::debug!(current = %current, "Already on login page, skipping redirect");
            return;
        }
        tracing::warn!(from = %current, to = %self.config.login_path, "Redirecting to login");
        self.navigator.redirect(&self.config.login_path);
    }
}
