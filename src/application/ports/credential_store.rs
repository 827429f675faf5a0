//! Credential Store Port - 持久化键值存储
//!
//! 以字符串为键的持久化存储，保存登录令牌和用户资料。
//! 写入采用后写覆盖，没有事务保证；清除操作是幂等的。

use thiserror::Error;

/// Bearer 令牌的存储键
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// JSON 序列化用户资料的存储键
pub const USER_PROFILE_KEY: &str = "user";

/// 凭证存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Credential Store Port
pub trait CredentialStorePort: Send + Sync {
    /// 读取键值，不存在时返回 `None`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入（覆盖）键值
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键值，键不存在时也返回成功
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// 保存登录结果
    fn store_session(&self, token: &str, profile_json: &str) -> Result<(), StorageError> {
        self.set(AUTH_TOKEN_KEY, token)?;
        self.set(USER_PROFILE_KEY, profile_json)
    }

    /// 清除令牌和用户资料
    fn clear_session(&self) -> Result<(), StorageError> {
        self.remove(AUTH_TOKEN_KEY)?;
        self.remove(USER_PROFILE_KEY)
    }
}
