/// IO 抽象层 - trait 定义
///
/// 该模块定义了环境变量存储的抽象接口，支持依赖注入和测试 mock。

use crate::utils::PathError;

/// 环境变量存储 trait
///
/// # 职责
/// - 读取/写入单个用户级变量（PATH）的原始字符串
/// - 不负责解析，仅负责 IO
///
/// 需要 `Sync`：保存操作在后台线程执行，主线程同时显示进度。
pub trait PathStore: Sync {
    /// 读取当前值
    ///
    /// # 返回
    /// 变量未设置时返回 `Ok(None)`
    fn read(&self) -> Result<Option<String>, PathError>;

    /// 写入新值，替换原有值
    ///
    /// 失败时返回 `PathError::Io`，调用方负责提示，不做重试。
    fn write(&self, value: &str) -> Result<(), PathError>;

    /// 存储位置描述，用于日志与界面提示
    fn describe(&self) -> String;
}
