//! Response Payload - 成功响应解码
//!
//! 后端有时把结果包在 `{ success, message, data }` 信封中，有时直接返回数据，
//! 有时返回纯数字或纯文本，并且 Content-Type 并不可靠。解码按顺序尝试：
//! 1. 信封：带布尔 `success` 字段的 JSON 对象
//! 2. 其它 JSON 值
//! 3. 数字字面量
//! 4. 原始文本

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::application::ApiError;

/// 信封格式的响应
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
    raw: Map<String, Value>,
}

impl Envelope {
    /// 仅当对象带有布尔 `success` 字段时视为信封
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let success = object.get("success")?.as_bool()?;
        Some(Self {
            success,
            message: object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            data: object.get("data").filter(|v| !v.is_null()).cloned(),
            raw: object.clone(),
        })
    }

    /// 先按整个对象转换，失败时退回 `data` 字段
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match serde_json::from_value::<T>(Value::Object(self.raw)) {
            Ok(typed) => Ok(typed),
            Err(whole_err) => match self.data {
                Some(data) => serde_json::from_value(data).map_err(decode_error),
                None => Err(decode_error(whole_err)),
            },
        }
    }
}

/// 解码后的成功响应
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Envelope(Envelope),
    Json(Value),
    Number(Number),
    Text(String),
}

impl Payload {
    /// 按固定顺序解码响应文本，不依赖 Content-Type
    pub fn decode(text: &str) -> Self {
        if text.trim().is_empty() {
            return Payload::Empty;
        }
        if let Some(value) = parse_json(text) {
            return match Envelope::from_value(&value) {
                Some(envelope) => Payload::Envelope(envelope),
                None => Payload::Json(value),
            };
        }
        if let Some(number) = parse_number(text) {
            return Payload::Number(number);
        }
        Payload::Text(text.to_string())
    }

    /// 转换为调用方声明的类型
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Payload::Envelope(envelope) => return envelope.into_typed(),
            Payload::Empty => Value::Null,
            Payload::Json(value) => value,
            Payload::Number(number) => Value::Number(number),
            Payload::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(decode_error)
    }
}

pub fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// JSON 之外的宽松数字：`+42`、`.5`、`42.`、`0042`
pub fn parse_number(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Number::from(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

fn decode_error(err: serde_json::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}
