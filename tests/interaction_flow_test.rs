//! 交互流程集成测试
//!
//! 测试场景：
//! - 添加、删除后退出进入确认菜单，保存写入正确的值
//! - 未修改时直接退出，不显示确认菜单
//! - 大小写不同的重复路径被拒绝，不产生变更记录
//! - 保存失败时保留修改，可以重试
//! - 基于文件的存储完成一次完整的读-改-存

use path_editor::{
    ChangeKind, FileStore, InteractionLoop, MemoryStore, PathStore, Reply, ScriptedConsole,
    Session,
};
use tempfile::TempDir;

const CONFIRM_TITLE: &str = "Environment variables have been modified.";

fn run<S: PathStore>(store: &S, console: &mut ScriptedConsole) -> Session {
    let mut interaction = InteractionLoop::from_store(store, console)
        .expect("store read succeeds")
        .expect("variable is set");
    interaction.run().expect("script runs to completion");
    interaction.into_session()
}

#[test]
fn test_add_remove_save_quit() {
    let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text(r"C:\C"),
        Reply::select("Remove"),
        Reply::select_many(&[r"C:\A"]),
        Reply::select("Quit"),
        Reply::select("Save"),
        Reply::select("Quit"),
    ]);

    let session = run(&store, &mut console);

    assert_eq!(session.current(), r"C:\B;C:\C");
    assert_eq!(
        session.change_log().render(),
        vec![("Add", r"C:\C"), ("Remove", r"C:\A")]
    );
    assert!(console.printed(CONFIRM_TITLE));
    assert!(console.printed("Saving changes..."));
    assert!(console.printed("Changes saved."));
    assert_eq!(store.writes(), vec![r"C:\B;C:\C".to_string()]);
    assert_eq!(console.remaining_replies(), 0);
}

#[test]
fn test_intermediate_states_are_rendered() {
    let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text(r"C:\C"),
        Reply::select("Remove"),
        Reply::select_many(&[r"C:\A"]),
        Reply::select("Quit"),
        Reply::select("Quit"),
    ]);

    run(&store, &mut console);

    let paths: Vec<Vec<&str>> = console
        .tables()
        .iter()
        .map(|rows| rows.iter().map(|row| row[1].as_str()).collect())
        .collect();
    assert_eq!(
        paths,
        vec![
            vec![r"C:\A", r"C:\B"],
            vec![r"C:\A", r"C:\B", r"C:\C"],
            vec![r"C:\B", r"C:\C"],
        ]
    );
}

#[test]
fn test_unchanged_value_exits_immediately() {
    let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
    let mut console = ScriptedConsole::new([Reply::select("Quit")]);

    let session = run(&store, &mut console);

    assert!(!session.is_modified());
    assert!(!console.printed(CONFIRM_TITLE));
    assert!(store.writes().is_empty());
}

#[test]
fn test_case_insensitive_duplicate_is_rejected() {
    let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text(r"c:\a"),
        Reply::select("Quit"),
    ]);

    let session = run(&store, &mut console);

    assert!(console.printed("Failed to add path."));
    assert!(session.change_log().is_empty());
    assert!(!console.printed(CONFIRM_TITLE));
}

#[test]
fn test_save_failure_keeps_changes() {
    let store = MemoryStore::new(Some(r"C:\A".to_string()));
    store.set_fail_writes(true);
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text(r"C:\B"),
        Reply::select("Quit"),
        Reply::select("Save"),
        Reply::select("View"),
        Reply::Key,
        Reply::select("Quit"),
    ]);

    let session = run(&store, &mut console);

    assert!(console.printed("Failed to save changes"));
    assert!(console.printed("Pending Changes:"));
    assert!(session.has_unsaved_changes());
    assert_eq!(session.current(), r"C:\A;C:\B");
    assert_eq!(store.read().unwrap().as_deref(), Some(r"C:\A"));
}

#[test]
fn test_save_can_be_retried() {
    let store = MemoryStore::new(Some(r"C:\A".to_string()));
    store.set_fail_writes(true);
    let mut console = ScriptedConsole::new([
        Reply::select("Remove"),
        Reply::select_many(&[r"C:\A"]),
        Reply::select("Quit"),
        Reply::select("Save"),
    ]);

    // 脚本在第二次保存前耗尽，先确认第一次保存失败
    let mut interaction = InteractionLoop::from_store(&store, &mut console)
        .unwrap()
        .unwrap();
    assert!(interaction.run().is_err());
    assert!(interaction.session().has_unsaved_changes());
    assert!(store.writes().is_empty());

    // 恢复写入后用同一会话重新开始确认流程
    store.set_fail_writes(false);
    let session = interaction.into_session();
    let mut console = ScriptedConsole::new([
        Reply::select("Quit"),
        Reply::select("Save"),
        Reply::select("Quit"),
    ]);
    let mut interaction = InteractionLoop::new(&store, &mut console, session);
    interaction.run().unwrap();

    assert!(!interaction.session().has_unsaved_changes());
    assert_eq!(store.writes(), vec![String::new()]);
}

#[test]
fn test_save_does_not_terminate() {
    let store = MemoryStore::new(Some(r"C:\A".to_string()));
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text(r"C:\B"),
        Reply::select("Quit"),
        Reply::select("Save"),
        Reply::select("Save"),
        Reply::select("Quit"),
    ]);

    run(&store, &mut console);

    assert_eq!(store.writes().len(), 2);
    assert_eq!(console.remaining_replies(), 0);
}

#[test]
fn test_edit_then_view_lists_every_operation() {
    let store = MemoryStore::new(Some(r"C:\A;C:\B".to_string()));
    let mut console = ScriptedConsole::new([
        Reply::select("Edit"),
        Reply::select(r"C:\B"),
        Reply::text(r"D:\B"),
        Reply::Key,
        Reply::select("Add"),
        Reply::text(r"C:\X"),
        Reply::select("Remove"),
        Reply::select_many(&[r"C:\X"]),
        Reply::select("Quit"),
        Reply::select("View"),
        Reply::Key,
        Reply::select("Quit"),
    ]);

    let session = run(&store, &mut console);

    let kinds: Vec<ChangeKind> = session.change_log().iter().map(|op| op.kind()).collect();
    assert_eq!(kinds, vec![ChangeKind::Edit, ChangeKind::Add, ChangeKind::Remove]);

    let view = console.tables().last().unwrap();
    assert_eq!(view.len(), 3);
    assert_eq!(view[0][1], r"C:\B -> D:\B");
    assert!(store.writes().is_empty());
}

#[test]
fn test_unset_variable() {
    let store = MemoryStore::new(None);
    let mut console = ScriptedConsole::new([]);

    assert!(InteractionLoop::from_store(&store, &mut console)
        .unwrap()
        .is_none());
    assert!(console.transcript().is_empty());
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("PATH");
    std::fs::write(&file, "/usr/local/bin;/usr/bin\n").unwrap();

    let store = FileStore::new(&file);
    let mut console = ScriptedConsole::new([
        Reply::select("Add"),
        Reply::text("/opt/tools/bin"),
        Reply::select("Quit"),
        Reply::select("Save"),
        Reply::select("Quit"),
    ]);

    run(&store, &mut console);

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "/usr/local/bin;/usr/bin;/opt/tools/bin"
    );
}
