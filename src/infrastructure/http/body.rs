//! Request Body - 请求体与请求头准备
//!
//! - 普通值序列化为 JSON 字符串
//! - multipart 表单原样交给 reqwest，由它生成带 boundary 的 Content-Type
//! - 二进制数据原样透传

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::Value;

use crate::application::ApiError;

const APPLICATION_JSON: &str = "application/json";

/// 请求体
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// 序列化为 JSON 字符串发送
    Json(Value),
    /// multipart/form-data，客户端不设置 Content-Type
    Form(Form),
    /// 原始字节，`content_type` 视为调用方显式提供的类型
    Binary {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
}

impl RequestBody {
    /// 把任意可序列化的值作为 JSON 请求体
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| ApiError::invalid_request(format!("Failed to serialize body: {}", e)))
    }

    pub fn binary(bytes: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        Self::Binary {
            bytes: bytes.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, RequestBody::Form(_))
    }

    /// 根据请求体和调用方提供的头计算最终请求头（不含 Authorization）
    pub fn prepare_headers(&self, mut headers: HeaderMap) -> Result<HeaderMap, ApiError> {
        match self {
            RequestBody::Form(_) => {
                headers.remove(CONTENT_TYPE);
            }
            RequestBody::Binary {
                content_type: Some(content_type),
                ..
            } if !headers.contains_key(CONTENT_TYPE) => {
                let value = HeaderValue::from_str(content_type).map_err(|e| {
                    ApiError::invalid_request(format!("Invalid content type: {}", e))
                })?;
                headers.insert(CONTENT_TYPE, value);
            }
            _ => {}
        }

        if !self.is_form() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        Ok(headers)
    }

    /// 把请求体挂到 reqwest 请求上
    pub(crate) fn attach(self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Form(form) => builder.multipart(form),
            RequestBody::Binary { bytes, .. } => builder.body(bytes),
        }
    }
}

impl From<()> for RequestBody {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Form> for RequestBody {
    fn from(form: Form) -> Self {
        Self::Form(form)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::binary(bytes, None)
    }
}
