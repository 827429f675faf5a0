//! Notification Service - 站内通知接口

use serde::de::IgnoredAny;
use std::sync::Arc;

use crate::application::ApiError;
use crate::domain::marketplace::{Notification, NotificationId};
use crate::infrastructure::http::ApiClient;

pub struct NotificationService {
    client: Arc<ApiClient>,
}

impl NotificationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.get("/api/notifications").await
    }

    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        self.client.get("/api/notifications/unread-count").await
    }

    pub async fn mark_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client
            .put::<IgnoredAny>(&format!("/api/notifications/{}/read", id), ())
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client
            .put::<IgnoredAny>("/api/notifications/read-all", ())
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("/api/notifications/{}", id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::test_support::{MockBackend, MockResponse};
    use crate::infrastructure::http::ApiClientConfig;
    use crate::infrastructure::navigation::InMemoryNavigator;
    use crate::infrastructure::storage::InMemoryCredentialStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_notification_endpoints() {
        let backend = MockBackend::start(|request| match request.path.as_str() {
            "/api/notifications/unread-count" => MockResponse::text(200, "3"),
            "/api/notifications" => MockResponse::json(
                200,
                json!([{"id": 1, "message": "Yeni sifariş", "read": false}]),
            ),
            _ => MockResponse::json(200, json!({"success": true, "message": "ok"})),
        })
        .await;
        let client = ApiClient::new(
            ApiClientConfig::new(backend.base_url()),
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryNavigator::new("/notifications")),
        )
        .unwrap();
        let notifications = NotificationService::new(client.arc());

        assert_eq!(notifications.unread_count().await.unwrap(), 3);
        let list = notifications.list().await.unwrap();
        assert_eq!(list[0].message, "Yeni sifariş");
        notifications.mark_read(1).await.unwrap();
        notifications.mark_all_read().await.unwrap();
        notifications.delete(1).await.unwrap();

        let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/api/notifications/unread-count",
                "/api/notifications",
                "/api/notifications/1/read",
                "/api/notifications/read-all",
                "/api/notifications/1",
            ]
        );
    }
}
