//! In-Memory Credential Store Implementation

use dashmap::DashMap;

use crate::application::ports::{CredentialStorePort, StorageError};

/// 内存凭证存储
pub struct InMemoryCredentialStore {
    entries: DashMap<String, String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStorePort for InMemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AUTH_TOKEN_KEY, USER_PROFILE_KEY};

    #[test]
    fn test_session_lifecycle() {
        let store = InMemoryCredentialStore::new();
        store.store_session("a.b.c", r#"{"id":1}"#).unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("a.b.c"));
        assert_eq!(store.get(USER_PROFILE_KEY).unwrap().as_deref(), Some(r#"{"id":1}"#));

        store.clear_session().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_twice_is_harmless() {
        let store = InMemoryCredentialStore::new();
        store.store_session("a.b.c", "{}").unwrap();
        store.clear_session().unwrap();
        store.clear_session().unwrap();
        assert!(store.get(AUTH_TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_PROFILE_KEY).unwrap().is_none());
    }
}
