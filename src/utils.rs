use thiserror::Error;

use crate::DELIMITER;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path already exists: {0}")]
    Duplicate(String),

    #[error("Invalid path entry: {0:?}")]
    InvalidEntry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background writer panicked before finishing")]
    WriterPanicked,
}

/// 条目比较（忽略大小写）
///
/// 使用 Unicode 小写折叠，而非仅 ASCII，`C:\Ünïcode` 与 `c:\ünïcode` 视为相同。
pub fn same_entry(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// 按分隔符切分原始值（保留空段）
pub fn split_segments(value: &str) -> impl Iterator<Item = &str> {
    value.split(DELIMITER)
}

/// 用分隔符重新拼接
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            joined.push(DELIMITER);
        }
        joined.push_str(segment);
    }
    joined
}
