//! Application Ports - 出站端口定义
//!
//! API 客户端依赖的抽象接口：凭证存储、页面导航

mod credential_store;
mod navigator;

pub use credential_store::{CredentialStorePort, StorageError, AUTH_TOKEN_KEY, USER_PROFILE_KEY};
pub use navigator::NavigatorPort;
