//! Session Context - 用户资料与登录报文

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::marketplace::{UserId, UserRole};

/// 登录时缓存的用户资料（存储键 `user`）
///
/// 后端返回的字段并不固定，未识别的字段保留在 `extra` 中，原样写回存储。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "fullName", alias = "username")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }

    /// 用于日志和控制台输出的名称
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "authToken")]
    pub token: String,
    #[serde(default, alias = "profile")]
    pub user: Option<SessionProfile>,
}
