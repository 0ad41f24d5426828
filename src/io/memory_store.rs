/// 内存存储实现
///
/// 用于 `--dry-run`（保存不会影响系统）以及测试。
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::traits::PathStore;
use crate::utils::PathError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
    writes: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new(value: Option<String>) -> Self {
        Self {
            value: Mutex::new(value),
            ..Self::default()
        }
    }

    /// 之后的写入都返回 `PermissionDenied`，直到再次设为 false
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 所有成功写入的值（按顺序）
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PathStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, PathError> {
        Ok(self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn write(&self, value: &str) -> Result<(), PathError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PathError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "write rejected by store",
            )));
        }

        *self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(value.to_string());
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store (changes are not persisted)".to_string()
    }
}
