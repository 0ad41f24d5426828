use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use path_editor::{
    show_entries, Console, FileStore, InteractionLoop, MemoryStore, PathStore, TerminalConsole,
    TextStyle, VARIABLE_NAME,
};

#[derive(Parser)]
#[command(name = "path_editor")]
#[command(about = "查看并编辑用户级 PATH 环境变量")]
#[command(version)]
struct Cli {
    /// 编辑保存在该文件中的 PATH 值，而不是用户环境变量
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 演练模式：保存只写入内存，不修改系统
    #[arg(long)]
    dry_run: bool,

    /// 仅列出当前条目后退出
    #[arg(long)]
    list: bool,

    /// 日志输出文件（追加写入）
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli)?;

    let store = open_store(&cli)?;
    let store: Box<dyn PathStore> = if cli.dry_run {
        tracing::info!(source = %store.describe(), "dry run; saves stay in memory");
        Box::new(MemoryStore::new(store.read()?))
    } else {
        store
    };

    let mut console = TerminalConsole::new();

    if cli.list {
        return handle_list(store.as_ref(), &mut console);
    }

    handle_interactive(store.as_ref(), &mut console)
}

/// 初始化日志：RUST_LOG 优先，否则按 --verbose 选择级别
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(env_filter)
                .init();
        }
    }

    Ok(())
}

/// 选择存储：--file 优先，否则使用平台默认
fn open_store(cli: &Cli) -> anyhow::Result<Box<dyn PathStore>> {
    if let Some(path) = &cli.file {
        return Ok(Box::new(FileStore::new(path)));
    }

    default_store()
}

#[cfg(windows)]
fn default_store() -> anyhow::Result<Box<dyn PathStore>> {
    Ok(Box::new(path_editor::UserEnvStore::new()))
}

#[cfg(not(windows))]
fn default_store() -> anyhow::Result<Box<dyn PathStore>> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set; use --file to choose where the PATH value is stored")?;

    Ok(Box::new(FileStore::new(
        home.join(".path_editor").join(VARIABLE_NAME),
    )))
}

/// 列出条目
fn handle_list(store: &dyn PathStore, console: &mut TerminalConsole) -> anyhow::Result<()> {
    match store.read()? {
        Some(value) => show_entries(console, &value),
        None => console.show_text(&format!("{VARIABLE_NAME} is not set."), TextStyle::Error),
    }
}

/// 交互编辑
fn handle_interactive(store: &dyn PathStore, console: &mut TerminalConsole) -> anyhow::Result<()> {
    match InteractionLoop::from_store(store, console)? {
        Some(mut interaction) => interaction.run(),
        None => Ok(()),
    }
}
