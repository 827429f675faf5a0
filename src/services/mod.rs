//! Services - 后端接口的类型化封装
//!
//! 每个服务只负责端点路径和请求/响应类型，所有认证和错误处理都在 `ApiClient` 中。

mod admin_service;
mod auth_service;
mod dto;
mod notification_service;
mod seller_service;

pub use admin_service::{AdminService, ReviewQueue};
pub use auth_service::AuthService;
pub use dto::{
    CategoryDraft, FileUpload, OrderStatusUpdate, PaymentMethodDraft, ProductDraft,
    RejectionReason, TopUpDraft, WithdrawalDraft,
};
pub use notification_service::NotificationService;
pub use seller_service::SellerService;
