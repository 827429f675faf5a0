//! MarketDesk - C2C 市场管理后台客户端
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Session Context: 访问令牌过期提示、缓存的用户资料
//! - Marketplace Context: 用户、商品、订单、分类、支付方式、充值/提现申请、通知
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CredentialStore, Navigator）
//! - Error: API 错误分类
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: ApiClient（认证、错误分类、响应解码）
//! - Storage: Sled / 内存凭证存储
//! - Navigation: 内存导航
//!
//! 服务 (services/): 各页面使用的后端接口封装

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use application::{ApiError, ErrorKind};
pub use config::{load_config, AppConfig};
pub use infrastructure::{ApiClient, ApiClientConfig};
