//! Navigator Port - 页面导航
//!
//! 401 时跳转登录页的可观察副作用

pub trait NavigatorPort: Send + Sync {
    /// 当前所在路径
    fn current_path(&self) -> String;

    /// 跳转到指定路径
    fn redirect(&self, path: &str);
}
