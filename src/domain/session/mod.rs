//! Session Context - 会话上下文
//!
//! 登录后保存在持久化键值存储中的状态：
//! - `authToken`: Bearer 令牌
//! - `user`: JSON 序列化的用户资料

mod errors;
mod profile;
mod token;

pub use errors::TokenError;
pub use profile::{LoginRequest, LoginResponse, SessionProfile};
pub use token::AccessToken;
