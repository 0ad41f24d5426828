/// IO 抽象层模块
///
/// 该模块提供了环境变量读写的抽象接口，遵循依赖倒置原则。
/// 支持依赖注入、测试 mock 和替换存储实现（注册表、文件、内存）。
///
/// # 架构设计
///
/// - **traits**: 定义 PathStore trait 接口
/// - **registry_store**: Windows 用户环境变量（HKCU\Environment）
/// - **file_store**: 基于纯文本文件的实现，适用于任何平台
/// - **memory_store**: 内存实现，用于 `--dry-run` 和测试
///
/// # 使用示例
///
/// ```rust
/// use path_editor::io::{MemoryStore, PathStore};
///
/// let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
/// store.write(r"C:\B")?;
/// assert_eq!(store.read()?.as_deref(), Some(r"C:\B"));
/// # Ok::<(), path_editor::PathError>(())
/// ```
pub mod traits;
pub mod file_store;
pub mod memory_store;
#[cfg(windows)]
pub mod registry_store;

// === 导出 trait 定义 ===
pub use traits::PathStore;

// === 导出默认实现 ===
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
#[cfg(windows)]
pub use registry_store::UserEnvStore;
