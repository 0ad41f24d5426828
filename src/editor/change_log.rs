/// 变更记录模块
///
/// 按时间顺序记录本次会话中尚未保存的编辑操作，供"查看待提交变更"显示。
/// 只追加、不合并：先添加后删除同一路径会保留两条记录。

use chrono::{DateTime, Local};

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Add,
    Edit,
    Remove,
}

impl ChangeKind {
    /// 显示标签
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Add => "Add",
            ChangeKind::Edit => "Edit",
            ChangeKind::Remove => "Remove",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 单条操作记录，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    kind: ChangeKind,
    description: String,
    recorded_at: DateTime<Local>,
}

impl Operation {
    pub fn new(kind: ChangeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            recorded_at: Local::now(),
        }
    }

    pub fn add(entry: &str) -> Self {
        Self::new(ChangeKind::Add, entry)
    }

    /// 描述格式为 `old -> new`
    pub fn edit(old_entry: &str, new_entry: &str) -> Self {
        Self::new(ChangeKind::Edit, format!("{old_entry} -> {new_entry}"))
    }

    pub fn remove(entry: &str) -> Self {
        Self::new(ChangeKind::Remove, entry)
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn recorded_at(&self) -> DateTime<Local> {
        self.recorded_at
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}

/// 待提交变更列表
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    operations: Vec<Operation>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾（插入顺序即时间顺序）
    pub fn append(&mut self, op: Operation) {
        tracing::debug!(%op, "recorded change");
        self.operations.push(op);
    }

    /// 生成用于显示的 (类型标签, 描述) 序列，不做任何过滤或聚合
    pub fn render(&self) -> Vec<(&'static str, &str)> {
        self.operations
            .iter()
            .map(|op| (op.kind.label(), op.description.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }
}
