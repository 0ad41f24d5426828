/// Windows 用户环境变量存储
///
/// 读写 `HKEY_CURRENT_USER\Environment` 下的 PATH 值，
/// 写入后广播 `WM_SETTINGCHANGE`，让新启动的进程看到变更。
use std::io::ErrorKind;

use winapi::shared::minwindef::LPARAM;
use winapi::um::winuser::{SendMessageTimeoutW, HWND_BROADCAST, SMTO_ABORTIFHUNG, WM_SETTINGCHANGE};
use winreg::enums::{RegType, HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};
use winreg::types::ToRegValue;
use winreg::RegKey;

use super::traits::PathStore;
use crate::utils::PathError;
use crate::VARIABLE_NAME;

const ENVIRONMENT_KEY: &str = "Environment";
const BROADCAST_TIMEOUT_MS: u32 = 5000;

/// 用户级环境变量存储
#[derive(Debug, Clone)]
pub struct UserEnvStore {
    name: String,
}

impl UserEnvStore {
    pub fn new() -> Self {
        Self {
            name: VARIABLE_NAME.to_string(),
        }
    }

    fn open(&self, flags: u32) -> std::io::Result<RegKey> {
        RegKey::predef(HKEY_CURRENT_USER).open_subkey_with_flags(ENVIRONMENT_KEY, flags)
    }
}

impl Default for UserEnvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PathStore for UserEnvStore {
    fn read(&self) -> Result<Option<String>, PathError> {
        let key = match self.open(KEY_READ) {
            Ok(key) => key,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match key.get_value::<String, _>(&self.name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, value: &str) -> Result<(), PathError> {
        let key = self.open(KEY_READ | KEY_WRITE)?;

        // 保留原有值类型；PATH 通常包含 %VAR%，新值默认 REG_EXPAND_SZ
        let vtype = match key.get_raw_value(&self.name) {
            Ok(raw) if matches!(raw.vtype, RegType::REG_SZ) => RegType::REG_SZ,
            _ => RegType::REG_EXPAND_SZ,
        };

        let mut raw = value.to_reg_value();
        raw.vtype = vtype;
        key.set_raw_value(&self.name, &raw)?;

        broadcast_environment_change();
        Ok(())
    }

    fn describe(&self) -> String {
        format!(r"HKEY_CURRENT_USER\{}\{}", ENVIRONMENT_KEY, self.name)
    }
}

fn broadcast_environment_change() {
    use std::os::windows::ffi::OsStrExt;

    let param: Vec<u16> = std::ffi::OsStr::new(ENVIRONMENT_KEY)
        .encode_wide()
        .chain(Some(0))
        .collect();
    let mut result: usize = 0;

    // SAFETY: param 是以 0 结尾的 UTF-16 字符串，在整个调用期间有效
    let sent = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            0,
            param.as_ptr() as LPARAM,
            SMTO_ABORTIFHUNG,
            BROADCAST_TIMEOUT_MS,
            &mut result,
        )
    };

    if sent == 0 {
        tracing::warn!("WM_SETTINGCHANGE broadcast timed out; running programs may not see the new PATH");
    }
}
