//! Domain Layer - 领域层
//!
//! 包含两个上下文:
//! - Session Context: 访问令牌与缓存的用户资料
//! - Marketplace Context: 后台页面读取和提交的实体模型

pub mod marketplace;
pub mod session;
