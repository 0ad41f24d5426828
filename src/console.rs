/// 终端交互层模块
///
/// 将提示、选择、表格输出等终端操作抽象为 `Console` trait，
/// 使状态机与编辑逻辑可以在没有真实终端的情况下测试。
///
/// # 架构设计
///
/// - **traits**: `Console` 能力接口
/// - **table**: 纯函数表格排版
/// - **terminal**: 基于 crossterm 的实现
/// - **scripted**: 按脚本回放输入的实现，用于测试
pub mod traits;
pub mod table;
pub mod terminal;
pub mod scripted;

pub use traits::{Console, TextStyle};
pub use terminal::TerminalConsole;
pub use scripted::{Reply, ScriptedConsole};
