//! Marketplace Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

pub type UserId = i64;
pub type ProductId = i64;
pub type OrderId = i64;
pub type CategoryId = i64;
pub type PaymentMethodId = i64;
pub type NotificationId = i64;
/// 充值申请和提现申请共用
pub type RequestId = i64;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[serde(alias = "admin", alias = "ROLE_ADMIN")]
    Admin,
    #[serde(alias = "seller", alias = "ROLE_SELLER")]
    Seller,
    #[serde(alias = "user", alias = "ROLE_USER", alias = "BUYER")]
    User,
    #[serde(other)]
    Unknown,
}

/// 审核状态（商品、充值申请、提现申请）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReviewStatus::Pending)
    }
}

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "confirmed")]
    Confirmed,
    #[serde(alias = "shipped")]
    Shipped,
    #[serde(alias = "delivered")]
    Delivered,
    #[serde(alias = "cancelled", alias = "CANCELED")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}
