//! Marketplace Context - 市场实体
//!
//! 后台和卖家页面读取、展示后即丢弃的实体，客户端不管理它们的生命周期。

mod entities;
mod value_objects;

pub use entities::{
    BalanceRequest, Category, DashboardStats, Notification, Order, OrderItem, PaymentMethod,
    Product, User, WithdrawalRequest,
};
pub use value_objects::{
    CategoryId, NotificationId, OrderId, OrderStatus, PaymentMethodId, ProductId, RequestId,
    ReviewStatus, UserId, UserRole,
};
