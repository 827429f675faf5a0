//! Auth Service - 登录、登出和本地会话查询

use serde::de::IgnoredAny;
use std::sync::Arc;

use crate::application::ports::{AUTH_TOKEN_KEY, USER_PROFILE_KEY};
use crate::application::ApiError;
use crate::domain::session::{AccessToken, LoginRequest, LoginResponse, SessionProfile};
use crate::infrastructure::http::{ApiClient, RequestBody};

const LOGIN_PATH: &str = "/api/auth/login";
const LOGOUT_PATH: &str = "/api/auth/logout";

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 登录并保存令牌和用户资料
    ///
    /// 先清除旧会话，过期的旧令牌不会让登录请求在本地失败。
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionProfile, ApiError> {
        self.client.credentials().clear_session()?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .client
            .post(LOGIN_PATH, RequestBody::json(&request)?)
            .await?;

        let token = AccessToken::new(response.token)
            .map_err(|e| ApiError::Decode(format!("Login returned no usable token: {}", e)))?;
        let profile = response.user.unwrap_or_else(|| SessionProfile {
            id: None,
            email: Some(email.to_string()),
            name: None,
            role: None,
            extra: Default::default(),
        });
        let profile_json = serde_json::to_string(&profile)
            .map_err(|e| ApiError::Storage(format!("Failed to serialize profile: {}", e)))?;

        self.client
            .credentials()
            .store_session(token.as_str(), &profile_json)?;

        tracing::info!(user = %profile.display_name(), "Logged in");
        Ok(profile)
    }

    /// 通知后端并清除本地会话
    ///
    /// 后端调用失败不影响本地清除。
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.is_authenticated()? {
            if let Err(e) = self.client.post::<IgnoredAny>(LOGOUT_PATH, ()).await {
                tracing::debug!(error = %e, "Backend logout failed");
            }
        }
        self.client.credentials().clear_session()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// 缓存的用户资料
    pub fn current_user(&self) -> Result<Option<SessionProfile>, ApiError> {
        let Some(json) = self.client.credentials().get(USER_PROFILE_KEY)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&json).ok())
    }

    /// 本地判断：存在未过期的令牌
    ///
    /// 只是提示，服务端仍可能拒绝该令牌。
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        let token = self.client.credentials().get(AUTH_TOKEN_KEY)?;
        Ok(token
            .and_then(|raw| AccessToken::new(raw).ok())
            .map(|token| token.ensure_fresh().is_ok())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CredentialStorePort;
    use crate::infrastructure::http::test_support::{expired_token, fresh_token, MockBackend, MockResponse};
    use crate::infrastructure::http::ApiClientConfig;
    use crate::infrastructure::navigation::InMemoryNavigator;
    use crate::infrastructure::storage::InMemoryCredentialStore;
    use serde_json::json;

    fn service(backend: &MockBackend, store: Arc<InMemoryCredentialStore>) -> AuthService {
        let client = ApiClient::new(
            ApiClientConfig::new(backend.base_url()),
            store,
            Arc::new(InMemoryNavigator::new("/login")),
        )
        .unwrap();
        AuthService::new(client.arc())
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let token = fresh_token();
        let reply = json!({"token": token, "user": {"id": 1, "email": "admin@marketdesk.az", "role": "ADMIN"}});
        let backend = MockBackend::start(move |_| MockResponse::json(200, reply.clone())).await;
        let store = Arc::new(InMemoryCredentialStore::new());
        let auth = service(&backend, store.clone());

        let profile = auth.login("admin@marketdesk.az", "secret").await.unwrap();
        assert!(profile.is_admin());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), Some(token));
        assert!(auth.is_authenticated().unwrap());
        assert_eq!(auth.current_user().unwrap().unwrap().id, Some(1));

        let requests = backend.requests();
        assert_eq!(requests[0].path, LOGIN_PATH);
        assert_eq!(requests[0].json()["email"], "admin@marketdesk.az");
    }

    #[tokio::test]
    async fn test_login_with_stale_token_still_reaches_backend() {
        let token = fresh_token();
        let reply = json!({"success": true, "data": {"token": token}});
        let backend = MockBackend::start(move |_| MockResponse::json(200, reply.clone())).await;
        let store = Arc::new(InMemoryCredentialStore::new());
        store.store_session(&expired_token(), "{}").unwrap();
        let auth = service(&backend, store.clone());

        let profile = auth.login("seller@marketdesk.az", "pw").await.unwrap();
        assert_eq!(profile.display_name(), "seller@marketdesk.az");
        assert_eq!(backend.hits(), 1);
    }

    #[tokio::test]
    async fn test_failed_login_surfaces_message() {
        let backend = MockBackend::start(|_| {
            MockResponse::json(400, json!({"success": false, "message": "Email və ya şifrə yanlışdır"}))
        })
        .await;
        let auth = service(&backend, Arc::new(InMemoryCredentialStore::new()));

        let err = auth.login("x@y.az", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Email və ya şifrə yanlışdır");
        assert!(!auth.is_authenticated().unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let backend = MockBackend::start(|_| MockResponse::text(200, "")).await;
        let store = Arc::new(InMemoryCredentialStore::new());
        store.store_session(&fresh_token(), "{}").unwrap();
        let auth = service(&backend, store.clone());

        auth.logout().await.unwrap();
        assert!(store.is_empty());
        assert!(auth.current_user().unwrap().is_none());
        assert_eq!(backend.requests()[0].path, LOGOUT_PATH);
    }
}
