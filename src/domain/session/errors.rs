//! Session Context - Errors

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Access token is empty")]
    Empty,

    #[error("Malformed access token: {0}")]
    Malformed(String),

    #[error("Access token has no exp claim")]
    MissingExpiry,

    #[error("Access token expired at {0}")]
    Expired(DateTime<Utc>),
}

impl TokenError {
    /// 令牌本身可以解码，只是已经过期
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired(_))
    }
}
