//! Admin Service - 管理后台接口

use serde::de::IgnoredAny;
use std::sync::Arc;

use super::dto::{CategoryDraft, OrderStatusUpdate, PaymentMethodDraft, RejectionReason};
use crate::application::ApiError;
use crate::domain::marketplace::{
    BalanceRequest, Category, CategoryId, DashboardStats, Order, OrderId, OrderStatus,
    PaymentMethod, PaymentMethodId, Product, ProductId, RequestId, User, UserId,
    WithdrawalRequest,
};
use crate::infrastructure::http::{ApiClient, RequestBody};

/// 需要管理员审核的队列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewQueue {
    Products,
    BalanceRequests,
    Withdrawals,
}

impl ReviewQueue {
    fn base_path(&self) -> &'static str {
        match self {
            ReviewQueue::Products => "/admin/api/products",
            ReviewQueue::BalanceRequests => "/admin/api/balance-requests",
            ReviewQueue::Withdrawals => "/admin/api/withdrawal-requests",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "product" | "products" => Some(Self::Products),
            "balance" | "balance-request" | "balance-requests" => Some(Self::BalanceRequests),
            "withdrawal" | "withdrawals" => Some(Self::Withdrawals),
            _ => None,
        }
    }
}

pub struct AdminService {
    client: Arc<ApiClient>,
}

impl AdminService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/admin/api/dashboard/stats").await
    }

    // ---- users ----

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/admin/api/users").await
    }

    pub async fn set_user_blocked(&self, id: UserId, blocked: bool) -> Result<(), ApiError> {
        let action = if blocked { "block" } else { "unblock" };
        self.client
            .put::<IgnoredAny>(&format!("/admin/api/users/{}/{}", id, action), ())
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("/admin/api/users/{}", id))
            .await?;
        Ok(())
    }

    // ---- products ----

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get(ReviewQueue::Products.base_path()).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("{}/{}", ReviewQueue::Products.base_path(), id))
            .await?;
        Ok(())
    }

    // ---- orders ----

    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/admin/api/orders").await
    }

    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let body = RequestBody::json(&OrderStatusUpdate { status })?;
        self.client
            .put::<IgnoredAny>(&format!("/admin/api/orders/{}/status", id), body)
            .await?;
        Ok(())
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get("/api/categories").await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        self.client
            .post("/admin/api/categories", RequestBody::json(draft)?)
            .await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        self.client
            .put(&format!("/admin/api/categories/{}", id), RequestBody::json(draft)?)
            .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("/admin/api/categories/{}", id))
            .await?;
        Ok(())
    }

    // ---- payment methods ----

    pub async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>, ApiError> {
        self.client.get("/admin/api/payment-methods").await
    }

    pub async fn create_payment_method(
        &self,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, ApiError> {
        self.client
            .post("/admin/api/payment-methods", RequestBody::json(draft)?)
            .await
    }

    pub async fn update_payment_method(
        &self,
        id: PaymentMethodId,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, ApiError> {
        self.client
            .put(
                &format!("/admin/api/payment-methods/{}", id),
                RequestBody::json(draft)?,
            )
            .await
    }

    pub async fn delete_payment_method(&self, id: PaymentMethodId) -> Result<(), ApiError> {
        self.client
            .delete::<IgnoredAny>(&format!("/admin/api/payment-methods/{}", id))
            .await?;
        Ok(())
    }

    // ---- review queues ----

    pub async fn list_balance_requests(&self) -> Result<Vec<BalanceRequest>, ApiError> {
        self.client
            .get(ReviewQueue::BalanceRequests.base_path())
            .await
    }

    pub async fn list_withdrawal_requests(&self) -> Result<Vec<WithdrawalRequest>, ApiError> {
        self.client.get(ReviewQueue::Withdrawals.base_path()).await
    }

    pub async fn approve(&self, queue: ReviewQueue, id: RequestId) -> Result<(), ApiError> {
        self.client
            .put::<IgnoredAny>(&format!("{}/{}/approve", queue.base_path(), id), ())
            .await?;
        tracing::info!(queue = ?queue, id = id, "Approved");
        Ok(())
    }

    pub async fn reject(
        &self,
        queue: ReviewQueue,
        id: RequestId,
        reason: Option<String>,
    ) -> Result<(), ApiError> {
        let body = RequestBody::json(&RejectionReason { reason })?;
        self.client
            .put::<IgnoredAny>(&format!("{}/{}/reject", queue.base_path(), id), body)
            .await?;
        tracing::info!(queue = ?queue, id = id, "Rejected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::marketplace::ReviewStatus;
    use crate::infrastructure::http::test_support::{MockBackend, MockResponse, RecordedRequest};
    use crate::infrastructure::http::ApiClientConfig;
    use crate::infrastructure::navigation::InMemoryNavigator;
    use crate::infrastructure::storage::InMemoryCredentialStore;
    use serde_json::json;

    async fn service<F>(responder: F) -> (AdminService, MockBackend)
    where
        F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
    {
        let backend = MockBackend::start(responder).await;
        let client = ApiClient::new(
            ApiClientConfig::new(backend.base_url()),
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(InMemoryNavigator::new("/admin")),
        )
        .unwrap();
        (AdminService::new(client.arc()), backend)
    }

    #[tokio::test]
    async fn test_list_balance_requests_from_envelope() {
        let (admin, _backend) = service(|_| {
            MockResponse::json(
                200,
                json!({"success": true, "data": [
                    {"id": 5, "amount": 20.0, "status": "PENDING", "userEmail": "s@m.az"}
                ]}),
            )
        })
        .await;

        let requests = admin.list_balance_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].status, ReviewStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_and_reject_paths() {
        let (admin, backend) = service(|_| MockResponse::text(200, "OK")).await;

        admin.approve(ReviewQueue::Withdrawals, 7).await.unwrap();
        admin
            .reject(ReviewQueue::Products, 3, Some("Şəkil uyğun deyil".to_string()))
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].path, "/admin/api/withdrawal-requests/7/approve");
        assert_eq!(requests[1].path, "/admin/api/products/3/reject");
        assert_eq!(requests[1].json()["reason"], "Şəkil uyğun deyil");
    }

    #[tokio::test]
    async fn test_update_order_status_body() {
        let (admin, backend) = service(|_| MockResponse::json(200, json!({"success": true}))).await;

        admin.update_order_status(11, OrderStatus::Shipped).await.unwrap();

        let request = &backend.requests()[0];
        assert_eq!(request.path, "/admin/api/orders/11/status");
        assert_eq!(request.json(), json!({"status": "SHIPPED"}));
    }

    #[tokio::test]
    async fn test_category_crud() {
        let (admin, backend) = service(|request| match request.method.as_str() {
            "DELETE" => MockResponse::text(204, ""),
            _ => MockResponse::json(200, json!({"id": 4, "name": "Elektronika"})),
        })
        .await;

        let draft = CategoryDraft {
            name: "Elektronika".to_string(),
            description: None,
            parent_id: None,
        };
        let created = admin.create_category(&draft).await.unwrap();
        assert_eq!(created.id, 4);
        admin.delete_category(4).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].json(), json!({"name": "Elektronika"}));
        assert_eq!(requests[1].method, "DELETE");
        assert_eq!(requests[1].path, "/admin/api/categories/4");
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let (admin, _backend) = service(|_| {
            MockResponse::json(500, json!({"message": "İstifadəçi silinə bilməz"}))
        })
        .await;

        let err = admin.delete_user(1).await.unwrap_err();
        assert_eq!(err.to_string(), "İstifadəçi silinə bilməz");
    }

    #[test]
    fn test_review_queue_parse() {
        assert_eq!(ReviewQueue::parse("balance"), Some(ReviewQueue::BalanceRequests));
        assert_eq!(ReviewQueue::parse("orders"), None);
    }
}
