//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及 HTTP 客户端

pub mod http;
pub mod navigation;
pub mod storage;

pub use http::{ApiClient, ApiClientConfig, RequestBody};
pub use navigation::InMemoryNavigator;
pub use storage::{InMemoryCredentialStore, SledCredentialStore};
