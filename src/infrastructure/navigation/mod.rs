//! Navigation - 导航实现

mod memory_navigator;

pub use memory_navigator::InMemoryNavigator;
