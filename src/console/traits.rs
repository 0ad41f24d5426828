//! 终端能力接口
//!
//! 所有方法都是阻塞调用。终端本身的错误（读写失败、输入流结束、Ctrl+C）
//! 通过 `anyhow::Error` 向上传递并终止程序。

/// 文本样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    Heading,
    Success,
    Error,
}

pub trait Console {
    /// 单选，返回所选项的下标
    fn select_one(&mut self, title: &str, choices: &[String]) -> anyhow::Result<usize>;

    /// 多选（可以一项都不选），按列表顺序返回所选下标
    fn select_many(&mut self, title: &str, choices: &[String]) -> anyhow::Result<Vec<usize>>;

    /// 自由文本输入，允许空输入
    fn prompt_text(&mut self, label: &str) -> anyhow::Result<String>;

    fn show_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()>;

    fn show_text(&mut self, text: &str, style: TextStyle) -> anyhow::Result<()>;

    /// 显示提示并阻塞，直到按下任意键
    fn wait_keypress(&mut self, prompt: &str) -> anyhow::Result<()>;

    /// 显示进度动画，直到 `is_done` 返回 true
    fn run_with_progress(&mut self, message: &str, is_done: &dyn Fn() -> bool) -> anyhow::Result<()>;
}
