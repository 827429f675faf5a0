//! Marketplace Context - Entities
//!
//! 字段按后端 JSON（camelCase）命名；时间字段保持后端原始字符串。

use serde::{Deserialize, Serialize};

use super::value_objects::{
    CategoryId, NotificationId, OrderId, OrderStatus, PaymentMethodId, ProductId, RequestId,
    ReviewStatus, UserId, UserRole,
};

/// 平台用户（买家、卖家、管理员）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub seller_id: Option<UserId>,
    #[serde(default)]
    pub status: Option<ReviewStatus>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

/// 订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub buyer_id: Option<UserId>,
    #[serde(default)]
    pub seller_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, alias = "totalPrice")]
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 商品分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// 充值/提现使用的支付方式（银行卡、电子钱包等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// 余额充值申请
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    pub id: RequestId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub payment_method_id: Option<PaymentMethodId>,
    #[serde(default)]
    pub receipt_url: Option<String>,
    pub status: ReviewStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 提现申请
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub id: RequestId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub payment_method_id: Option<PaymentMethodId>,
    pub status: ReviewStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 站内通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 后台首页统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_sellers: u64,
    pub total_products: u64,
    pub total_orders: u64,
    pub pending_products: u64,
    pub pending_balance_requests: u64,
    pub pending_withdrawals: u64,
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_backend_json() {
        let json = r#"{
            "id": 12,
            "title": "Telefon",
            "price": 250.0,
            "categoryId": 4,
            "status": "PENDING",
            "imageUrls": ["/img/1.jpg"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Telefon");
        assert_eq!(product.category_id, Some(4));
        assert_eq!(product.status, Some(ReviewStatus::Pending));
        assert_eq!(product.image_urls.len(), 1);
    }

    #[test]
    fn test_notification_type_field() {
        let json = r#"{"id":1,"message":"Sifarişiniz göndərildi","isRead":true,"type":"ORDER"}"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert!(notification.read);
        assert_eq!(notification.kind.as_deref(), Some("ORDER"));
    }

    #[test]
    fn test_partial_stats() {
        let stats: DashboardStats = serde_json::from_str(r#"{"totalUsers":10}"#).unwrap();
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.total_orders, 0);
    }

    #[test]
    fn test_payment_method_active_by_default() {
        let method: PaymentMethod = serde_json::from_str(r#"{"id":2,"name":"Kapital Bank"}"#).unwrap();
        assert!(method.active);
    }
}
