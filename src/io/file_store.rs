/// 文件存储实现
///
/// 将变量值保存在一个纯文本文件中。非 Windows 平台的默认存储，
/// 也可通过 `--file` 在任何平台使用。
use std::io::ErrorKind;
use std::path::PathBuf;

use super::traits::PathStore;
use crate::utils::PathError;

/// 基于文件的 PATH 存储
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PathStore for FileStore {
    fn read(&self) -> Result<Option<String>, PathError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, value: &str) -> Result<(), PathError> {
        // 确保父目录存在
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, value)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("PATH"));

        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("PATH"));

        store.write(r"C:\A;C:\B").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(r"C:\A;C:\B"));
    }

    #[test]
    fn test_read_trims_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("PATH");
        std::fs::write(&file, "/usr/bin;/opt/bin\r\n").unwrap();

        let store = FileStore::new(&file);
        assert_eq!(store.read().unwrap().as_deref(), Some("/usr/bin;/opt/bin"));
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("subdir").join("PATH");

        let store = FileStore::new(&file);
        store.write("x").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let dir = TempDir::new().unwrap();
        // 目标是一个已存在的目录，写入必然失败
        let store = FileStore::new(dir.path());

        assert!(matches!(store.write("x"), Err(PathError::Io(_))));
    }
}
