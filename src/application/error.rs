//! 应用层错误定义
//!
//! API 客户端和各个服务共用的错误类型

use thiserror::Error;

use crate::application::ports::StorageError;
use crate::domain::session::TokenError;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized, please log in again";
pub const AUTHORIZATION_ERROR_MESSAGE: &str = "Authorization error, please log in again";

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 会话失效：本地令牌过期/无法解码，或服务端 401 / HTML 登录页
    Session,
    /// 服务端返回了 JSON 错误体
    StructuredApi,
    /// 服务端返回了纯文本或无法解析的错误体
    UnstructuredApi,
    /// 网络层失败
    Transport,
    /// 成功响应无法转换为调用方声明的类型
    Decode,
    /// 凭证存储读写失败
    Storage,
    /// 请求在发出前就无法构建
    InvalidRequest,
}

/// 会话失效的具体原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFailure {
    /// 本地检查发现令牌已过期
    Expired,
    /// 本地无法解码令牌
    Malformed,
    /// 服务端返回 401
    Unauthorized,
    /// 服务端返回 HTML 页面（通常是登录页）
    HtmlResponse,
}

impl SessionFailure {
    /// 由服务端确认的失效，需要跳转登录页
    pub fn is_server_confirmed(&self) -> bool {
        matches!(self, SessionFailure::Unauthorized | SessionFailure::HtmlResponse)
    }

    fn message(&self) -> &'static str {
        match self {
            SessionFailure::Expired | SessionFailure::Malformed => SESSION_EXPIRED_MESSAGE,
            SessionFailure::Unauthorized => UNAUTHORIZED_MESSAGE,
            SessionFailure::HtmlResponse => AUTHORIZATION_ERROR_MESSAGE,
        }
    }
}

/// API 错误
///
/// `Display` 即面向最终用户的消息。
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Session {
        reason: SessionFailure,
        message: String,
    },

    #[error("{message}")]
    Structured { status: u16, message: String },

    #[error("{message}")]
    Unstructured { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn session(reason: SessionFailure) -> Self {
        Self::Session {
            reason,
            message: reason.message().to_string(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Session { .. } => ErrorKind::Session,
            ApiError::Structured { .. } => ErrorKind::StructuredApi,
            ApiError::Unstructured { .. } => ErrorKind::UnstructuredApi,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Storage(_) => ErrorKind::Storage,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// 调用方应提示重新登录
    pub fn is_session(&self) -> bool {
        matches!(self, ApiError::Session { .. })
    }

    /// 服务端返回的 HTTP 状态码（仅 API 错误）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Structured { status, .. } | ApiError::Unstructured { status, .. } => {
                Some(*status)
            }
            ApiError::Session {
                reason: SessionFailure::Unauthorized,
                ..
            } => Some(401),
            _ => None,
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        if err.is_expired() {
            Self::session(SessionFailure::Expired)
        } else {
            Self::session(SessionFailure::Malformed)
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
