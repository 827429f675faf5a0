//! Sled-based Credential Store Implementation

use sled::{Db, Tree};
use std::path::Path;

use crate::application::ports::{CredentialStorePort, StorageError};

const CREDENTIALS_TREE: &str = "credentials";

/// Sled 凭证存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库目录
    pub db_path: String,
}

/// Sled 凭证存储
///
/// 每次写入和删除后立即 flush，进程退出后会话仍然保留。
pub struct SledCredentialStore {
    // 保持数据库句柄存活
    _db: Db,
    tree: Tree,
}

impl SledCredentialStore {
    pub fn new(config: &SledStoreConfig) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        let tree = db
            .open_tree(CREDENTIALS_TREE)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledCredentialStore initialized");

        Ok(Self { _db: db, tree })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.tree
            .flush()
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl CredentialStorePort for SledCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.tree.get(key) {
            Ok(Some(data)) => String::from_utf8(data.to_vec())
                .map(Some)
                .map_err(|e| StorageError::SerializationError(e.to_string())),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::DatabaseError(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree
            .insert(key, value.as_bytes())
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.tree
            .remove(key)
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        self.flush()
    }
}
