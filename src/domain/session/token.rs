//! Session Context - 访问令牌
//!
//! 只解码 JWT 的负载段读取 `exp`，不校验签名。
//!
//! 这是非权威的本地提示：令牌是否有效永远由服务端判定（签名、吊销等），
//! 客户端检查只用于在发起请求前尽早发现已过期的会话。
//! 不能把它当作信任边界。

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Number;

use super::TokenError;

/// 负载段中唯一关心的声明
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<Number>,
}

/// Bearer 访问令牌
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` 头的值
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// 解码 `exp` 声明（秒级 Unix 时间戳，允许小数）
    ///
    /// 超出 i64 的值饱和到 `i64::MAX`，视为遥远的将来。
    pub fn expiry_secs(&self) -> Result<i64, TokenError> {
        let payload = payload_segment(&self.0)?;
        let bytes = decode_segment(payload)?;
        let claim: ExpiryClaim = serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::Malformed(format!("payload is not a JSON object: {}", e)))?;
        let exp = claim.exp.ok_or(TokenError::MissingExpiry)?;

        exp.as_i64()
            .or_else(|| exp.as_u64().map(|_| i64::MAX))
            .or_else(|| exp.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
            .ok_or_else(|| TokenError::Malformed(format!("exp is not a timestamp: {}", exp)))
    }

    /// 过期时间点，超出 chrono 可表示范围时截断到边界
    pub fn expires_at(&self) -> Result<DateTime<Utc>, TokenError> {
        self.expiry_secs().map(clamp_timestamp)
    }

    /// 在 `now` 时刻令牌是否仍可使用
    ///
    /// 过期时间点本身视为已过期。
    pub fn ensure_fresh_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        let secs = self.expiry_secs()?;
        if now.timestamp() < secs {
            Ok(())
        } else {
            Err(TokenError::Expired(clamp_timestamp(secs)))
        }
    }

    pub fn ensure_fresh(&self) -> Result<(), TokenError> {
        self.ensure_fresh_at(Utc::now())
    }
}

// 令牌本身不进日志
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"***").finish()
    }
}

fn clamp_timestamp(secs: i64) -> DateTime<Utc> {
    match Utc.timestamp_opt(secs, 0).single() {
        Some(instant) => instant,
        None if secs > 0 => DateTime::<Utc>::MAX_UTC,
        None => DateTime::<Utc>::MIN_UTC,
    }
}

fn payload_segment(token: &str) -> Result<&str, TokenError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_header), Some(payload), Some(_signature), None) if !payload.is_empty() => {
            Ok(payload)
        }
        _ => Err(TokenError::Malformed(
            "expected three dot-separated segments".to_string(),
        )),
    }
}

/// base64url 解码，容忍补齐字符和标准字母表
fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| TokenError::Malformed(format!("payload is not base64url: {}", e)))
}
