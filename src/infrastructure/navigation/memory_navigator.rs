//! In-Memory Navigator
//!
//! 记录当前路径和跳转历史；命令行中"当前路径"是正在执行的命令对应的页面。

use std::sync::RwLock;

use crate::application::ports::NavigatorPort;

pub struct InMemoryNavigator {
    current: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl InMemoryNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(initial_path.into()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// 依次发生过的跳转
    pub fn redirects(&self) -> Vec<String> {
        self.history
            .read()
            .map(|h| h.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.redirects().pop()
    }
}

impl NavigatorPort for InMemoryNavigator {
    fn current_path(&self) -> String {
        self.current
            .read()
            .map(|p| p.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn redirect(&self, path: &str) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = path.to_string();
        drop(current);

        let mut history = self
            .history
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        history.push(path.to_string());
        tracing::debug!(path = %path, "Navigated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_updates_current_path() {
        let navigator = InMemoryNavigator::new("/admin/users");
        assert_eq!(navigator.current_path(), "/admin/users");
        assert!(navigator.last_redirect().is_none());

        navigator.redirect("/login");
        assert_eq!(navigator.current_path(), "/login");
        assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
    }
}
