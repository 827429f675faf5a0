//! 应用层
//!
//! 包含：
//! - ports: 六边形架构端口定义（CredentialStore、Navigator）
//! - error: API 错误定义与分类

pub mod error;
pub mod ports;

pub use error::{ApiError, ErrorKind, SessionFailure};

pub use ports::{
    CredentialStorePort, NavigatorPort, StorageError, AUTH_TOKEN_KEY, USER_PROFILE_KEY,
};
