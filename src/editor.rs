/// 编辑器层模块
///
/// 该模块提供 PATH 值的编辑接口与变更记录。
/// 遵循"修改-保存分离"原则，所有修改操作仅在内存中进行，需要显式保存到存储。
///
/// # 架构设计
///
/// - **paths**: 纯函数，对分隔符拼接的字符串进行增删改
/// - **change_log**: 变更记录，按时间顺序保存待提交的操作
///
/// # 使用示例
///
/// ```rust
/// use path_editor::{paths, ChangeLog, Operation};
///
/// let value = paths::add(r"C:\A;C:\B", r"C:\C")?;
/// assert_eq!(value, r"C:\A;C:\B;C:\C");
///
/// let mut log = ChangeLog::new();
/// log.append(Operation::add(r"C:\C"));
/// assert_eq!(log.len(), 1);
/// # Ok::<(), path_editor::PathError>(())
/// ```
pub mod change_log;
pub mod paths;

// === 导出公共接口 ===
pub use change_log::{ChangeKind, ChangeLog, Operation};
