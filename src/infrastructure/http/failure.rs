//! Failure Classification - 非 2xx 响应分类
//!
//! 纯函数，不依赖网络：根据状态码和响应文本得到最终的 `ApiError`。
//! 会话类错误（401、HTML 页面）的副作用（清除凭证、跳转）由客户端执行。

use reqwest::StatusCode;
use serde_json::Value;

use crate::application::{ApiError, SessionFailure};

/// 已知的后端纯文本错误
///
/// TODO: 后端把"不能购买自己的商品"改为 JSON 信封返回后删除此表。
const LEGACY_TEXT_ERRORS: &[&str] = &["Öz məhsulunuzu ala bilməzsiniz"];

/// 对失败响应分类
pub fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::session(SessionFailure::Unauthorized);
    }

    // 服务端返回了登录页/错误页，而不是 API 错误
    if looks_like_html(body) {
        return ApiError::session(SessionFailure::HtmlResponse);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => ApiError::Structured {
            status: status.as_u16(),
            message: json_message(&value).unwrap_or_else(|| generic_message(status)),
        },
        Err(_) => ApiError::Unstructured {
            status: status.as_u16(),
            message: text_message(status, body),
        },
    }
}

pub fn looks_like_html(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    lowered.contains("<!doctype") || lowered.contains("<html")
}

/// `{ success: false, message }` 或任何带字符串 `message` 的对象
fn json_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

fn text_message(status: StatusCode, body: &str) -> String {
    if let Some(known) = LEGACY_TEXT_ERRORS.iter().find(|known| body.contains(*known)) {
        return known.to_string();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        generic_message(status)
    } else {
        trimmed.to_string()
    }
}

fn generic_message(status: StatusCode) -> String {
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ErrorKind;

    #[test]
    fn test_unauthorized_is_session_error() {
        let err = classify_failure(StatusCode::UNAUTHORIZED, r#"{"message":"token"}"#);
        assert!(matches!(
            err,
            ApiError::Session { reason: SessionFailure::Unauthorized, .. }
        ));
    }

    #[test]
    fn test_html_body_is_session_error_for_any_status() {
        for status in [StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR, StatusCode::NOT_FOUND] {
            let err = classify_failure(status, "<!DOCTYPE html><html><body>Login</body></html>");
            assert!(matches!(
                err,
                ApiError::Session { reason: SessionFailure::HtmlResponse, .. }
            ));
        }
        assert!(looks_like_html("  <HTML>"));
    }

    #[test]
    fn test_envelope_message_is_passed_verbatim() {
        let err = classify_failure(StatusCode::BAD_REQUEST, r#"{"success":false,"message":"X"}"#);
        assert_eq!(err.kind(), ErrorKind::StructuredApi);
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn test_json_without_message_uses_status() {
        let err = classify_failure(StatusCode::CONFLICT, r#"{"error":"dup"}"#);
        assert_eq!(err.to_string(), "HTTP 409: Conflict");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_plain_text_error() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "Balance is not enough");
        assert_eq!(err.kind(), ErrorKind::UnstructuredApi);
        assert_eq!(err.to_string(), "Balance is not enough");

        let empty = classify_failure(StatusCode::BAD_GATEWAY, "");
        assert_eq!(empty.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_legacy_text_error() {
        let body = "java.lang.RuntimeException: Öz məhsulunuzu ala bilməzsiniz\n\tat ...";
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(err.to_string(), "Öz məhsulunuzu ala bilməzsiniz");
    }
}
