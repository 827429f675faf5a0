//! HTTP Client Layer - 后端 REST API 客户端
//!
//! - client: 认证、错误分类和响应解码的统一出口
//! - body: 请求体与请求头准备
//! - payload: 成功响应解码
//! - failure: 失败响应分类

mod body;
mod client;
mod failure;
mod payload;

#[cfg(test)]
pub(crate) mod test_support;

pub use body::RequestBody;
pub use client::{ApiClient, ApiClientConfig};
pub use failure::{classify_failure, looks_like_html};
pub use payload::{parse_json, parse_number, Envelope, Payload};
