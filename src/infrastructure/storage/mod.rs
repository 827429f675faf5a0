//! Credential Storage - 凭证存储实现
//!
//! - sled: 持久化到本地目录，供命令行使用
//! - memory: DashMap 内存实现，供测试和一次性会话使用

mod memory_store;
mod sled_store;

pub use memory_store::InMemoryCredentialStore;
pub use sled_store::{SledCredentialStore, SledStoreConfig};
