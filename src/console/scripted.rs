/// 脚本化终端
///
/// 按顺序回放预设的回复，并记录所有输出，供测试断言。
/// 选择类回复按显示文本匹配选项，避免测试依赖下标。
use std::collections::VecDeque;

use anyhow::{anyhow, bail};

use super::traits::{Console, TextStyle};

/// 预设回复
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 单选：选项文本
    Select(String),
    /// 多选：选项文本列表（可为空）
    SelectMany(Vec<String>),
    /// 文本输入
    Text(String),
    /// 按任意键
    Key,
}

impl Reply {
    pub fn select(choice: &str) -> Self {
        Reply::Select(choice.to_string())
    }

    pub fn select_many(choices: &[&str]) -> Self {
        Reply::SelectMany(choices.iter().map(|c| c.to_string()).collect())
    }

    pub fn text(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<Reply>,
    /// 所有输出（提示标题、文本、表格行）
    transcript: Vec<String>,
    /// 每次 show_table 的数据行
    tables: Vec<Vec<Vec<String>>>,
}

impl ScriptedConsole {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn tables(&self) -> &[Vec<Vec<String>>] {
        &self.tables
    }

    /// 输出中是否出现过包含 `needle` 的行
    pub fn printed(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.len()
    }

    fn next_reply(&mut self, prompt: &str) -> anyhow::Result<Reply> {
        self.replies
            .pop_front()
            .ok_or_else(|| anyhow!("Script exhausted at prompt '{prompt}'"))
    }
}

fn position(choices: &[String], wanted: &str) -> anyhow::Result<usize> {
    choices
        .iter()
        .position(|c| c == wanted)
        .ok_or_else(|| anyhow!("'{wanted}' is not among {choices:?}"))
}

impl Console for ScriptedConsole {
    fn select_one(&mut self, title: &str, choices: &[String]) -> anyhow::Result<usize> {
        self.transcript.push(title.to_string());
        match self.next_reply(title)? {
            Reply::Select(wanted) => position(choices, &wanted),
            other => bail!("Expected a selection for '{title}', script has {other:?}"),
        }
    }

    fn select_many(&mut self, title: &str, choices: &[String]) -> anyhow::Result<Vec<usize>> {
        self.transcript.push(title.to_string());
        match self.next_reply(title)? {
            Reply::SelectMany(wanted) => wanted.iter().map(|w| position(choices, w)).collect(),
            other => bail!("Expected a multi-selection for '{title}', script has {other:?}"),
        }
    }

    fn prompt_text(&mut self, label: &str) -> anyhow::Result<String> {
        self.transcript.push(label.to_string());
        match self.next_reply(label)? {
            Reply::Text(text) => Ok(text),
            other => bail!("Expected text for '{label}', script has {other:?}"),
        }
    }

    fn show_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()> {
        self.transcript.push(headers.join(" | "));
        self.transcript
            .extend(rows.iter().map(|row| row.join(" | ")));
        self.tables.push(rows.to_vec());
        Ok(())
    }

    fn show_text(&mut self, text: &str, _style: TextStyle) -> anyhow::Result<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn wait_keypress(&mut self, prompt: &str) -> anyhow::Result<()> {
        self.transcript.push(prompt.to_string());
        match self.next_reply(prompt)? {
            Reply::Key => Ok(()),
            other => bail!("Expected a keypress for '{prompt}', script has {other:?}"),
        }
    }

    fn run_with_progress(&mut self, message: &str, is_done: &dyn Fn() -> bool) -> anyhow::Result<()> {
        self.transcript.push(message.to_string());
        while !is_done() {
            std::thread::yield_now();
        }
        Ok(())
    }
}
