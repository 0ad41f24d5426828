pub mod utils;
pub mod editor;
pub mod io;
pub mod console;
pub mod session;

// 重新导出主要结构
pub use editor::{paths, ChangeKind, ChangeLog, Operation};
pub use io::{FileStore, MemoryStore, PathStore};
#[cfg(windows)]
pub use io::UserEnvStore;
pub use console::{Console, Reply, ScriptedConsole, TerminalConsole, TextStyle};
pub use session::{show_entries, ConfirmAction, InteractionLoop, MenuAction, Session};
pub use utils::PathError;

// 常量定义
pub const DELIMITER: char = ';';
pub const VARIABLE_NAME: &str = "PATH";
