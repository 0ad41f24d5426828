//! PATH 字符串编辑函数
//!
//! 全部为无状态纯函数，不做任何 IO。
//! 未被操作触及的原始分段（包括空段）保持原样，
//! 因此 `remove_one(add(p, e), e) == p` 按字节成立。

use crate::utils::{join_segments, same_entry, split_segments, PathError};
use crate::DELIMITER;

/// 规范条目序列（过滤空段），用于显示与选择
pub fn entries(value: &str) -> Vec<&str> {
    split_segments(value).filter(|s| !s.is_empty()).collect()
}

/// 检查条目是否已存在（忽略大小写）
///
/// 空字符串永远不是有效条目，因此总是返回 false。
pub fn contains(value: &str, entry: &str) -> bool {
    !entry.is_empty() && split_segments(value).any(|s| same_entry(s, entry))
}

/// 有效条目：非空，且不含分隔符
pub fn is_valid_entry(entry: &str) -> bool {
    !entry.is_empty() && !entry.contains(DELIMITER)
}

/// 在末尾追加条目
///
/// # 返回
/// 条目为空或含分隔符时返回 `PathError::InvalidEntry`，
/// 已存在时返回 `PathError::Duplicate`，否则返回新值
pub fn add(value: &str, entry: &str) -> Result<String, PathError> {
    if !is_valid_entry(entry) {
        return Err(PathError::InvalidEntry(entry.to_string()));
    }

    if contains(value, entry) {
        return Err(PathError::Duplicate(entry.to_string()));
    }

    if value.is_empty() {
        return Ok(entry.to_string());
    }

    Ok(format!("{value}{DELIMITER}{entry}"))
}

/// 删除所有与 `entry` 匹配的分段，没有匹配时原样返回
pub fn remove_one(value: &str, entry: &str) -> String {
    join_segments(split_segments(value).filter(|s| !same_entry(s, entry)))
}

/// 批量删除，保持剩余条目的原有顺序
pub fn remove_many<S: AsRef<str>>(value: &str, targets: &[S]) -> String {
    join_segments(
        split_segments(value)
            .filter(|s| !targets.iter().any(|t| same_entry(s, t.as_ref()))),
    )
}

/// 替换条目：先追加 `new_entry` 再删除 `old_entry`
///
/// 追加失败（重复或无效）时整体失败，`old_entry` 不会被删除。
pub fn edit(value: &str, old_entry: &str, new_entry: &str) -> Result<String, PathError> {
    let added = add(value, new_entry)?;
    Ok(remove_one(&added, old_entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"C:\A;C:\B";

    #[test]
    fn test_entries_filters_empty_segments() {
        assert_eq!(entries(r";C:\A;;C:\B;"), vec![r"C:\A", r"C:\B"]);
        assert!(entries("").is_empty());
        assert!(entries(";;").is_empty());
    }

    #[test]
    fn test_add_appends() {
        assert_eq!(add(SAMPLE, r"C:\C").unwrap(), r"C:\A;C:\B;C:\C");
        assert_eq!(add("", r"C:\C").unwrap(), r"C:\C");
    }

    #[test]
    fn test_add_duplicate_ignores_case() {
        let err = add(SAMPLE, r"c:\a").unwrap_err();
        assert!(matches!(err, PathError::Duplicate(ref e) if e == r"c:\a"));
    }

    #[test]
    fn test_add_is_exact_entry_match() {
        // 子串不算重复
        assert_eq!(add(SAMPLE, r"C:\").unwrap(), r"C:\A;C:\B;C:\");
        assert_eq!(add(SAMPLE, r"C:\A\bin").unwrap(), r"C:\A;C:\B;C:\A\bin");
    }

    #[test]
    fn test_add_rejects_empty_entry() {
        assert!(matches!(add(SAMPLE, ""), Err(PathError::InvalidEntry(_))));
        assert!(matches!(add("", ""), Err(PathError::InvalidEntry(_))));
    }

    #[test]
    fn test_add_rejects_delimiter() {
        // 含分隔符的输入会变成多个分段，绕过重复检查
        let result = add(SAMPLE, r"C:\C;c:\a");
        assert!(matches!(result, Err(PathError::InvalidEntry(ref e)) if e == r"C:\C;c:\a"));
        assert!(add(SAMPLE, ";").is_err());
    }

    #[test]
    fn test_remove_one() {
        assert_eq!(remove_one(SAMPLE, r"c:\b"), r"C:\A");
        assert_eq!(remove_one(r"C:\A;C:\B;c:\a", r"C:\A"), r"C:\B");
        assert_eq!(remove_one(SAMPLE, r"C:\Z"), SAMPLE);
        assert_eq!(remove_one("", r"C:\Z"), "");
    }

    #[test]
    fn test_remove_many_preserves_order() {
        let value = r"C:\A;C:\B;C:\C;C:\D";
        assert_eq!(remove_many(value, &[r"C:\C", r"c:\a"]), r"C:\B;C:\D");
        assert_eq!(remove_many(value, &Vec::<String>::new()), value);
    }

    #[test]
    fn test_edit_replaces() {
        assert_eq!(edit(SAMPLE, r"C:\A", r"D:\A").unwrap(), r"C:\B;D:\A");
    }

    #[test]
    fn test_edit_is_all_or_nothing() {
        let result = edit(SAMPLE, r"C:\A", r"C:\B");
        assert!(matches!(result, Err(PathError::Duplicate(_))));
        assert_eq!(entries(SAMPLE), vec![r"C:\A", r"C:\B"]);
    }

    #[test]
    fn test_edit_to_empty_keeps_old_entry() {
        assert!(matches!(edit(SAMPLE, r"C:\A", ""), Err(PathError::InvalidEntry(_))));
        assert!(matches!(edit(SAMPLE, r"C:\A", r"D:\A;D:\B"), Err(PathError::InvalidEntry(_))));
    }

    #[test]
    fn test_edit_same_entry_is_duplicate() {
        assert!(edit(SAMPLE, r"C:\A", r"c:\A").is_err());
    }
}
