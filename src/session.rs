/// 交互会话模块
///
/// `Session` 保存一次运行的全部状态（原始值、当前值、变更记录），
/// `InteractionLoop` 是驱动它的菜单状态机：
///
/// ```text
/// Browsing ──► AwaitingAction ──Add/Edit/Remove──► Browsing
///                    │
///                    └──Quit──► (未修改) Terminated
///                               (已修改) Confirming ──View/Save──► Confirming
///                                                   └──Quit──────► Terminated
/// ```
use std::thread;

use crate::console::{Console, TextStyle};
use crate::editor::{paths, ChangeLog, Operation};
use crate::io::PathStore;
use crate::utils::PathError;

const MENU_TITLE: &str = "Select action:";
const CONFIRM_TITLE: &str = "Environment variables have been modified.";
const SELECT_EDIT_TITLE: &str = "Select a path to edit:";
const SELECT_REMOVE_TITLE: &str = "Select paths to remove:";
const NEW_PATH_LABEL: &str = "Enter new path:";
const CONTINUE_PROMPT: &str = "Press any key to continue...";
const SAVING_MESSAGE: &str = "Saving changes...";
const NO_PATHS: &str = "No paths available.";

/// 会话状态
#[derive(Debug, Clone)]
pub struct Session {
    original_value: String,
    current_value: String,
    saved_value: String,
    change_log: ChangeLog,
}

impl Session {
    pub fn new(original_value: impl Into<String>) -> Self {
        let original_value = original_value.into();
        Self {
            current_value: original_value.clone(),
            saved_value: original_value.clone(),
            original_value,
            change_log: ChangeLog::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current_value
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// 当前值与启动时读取的值不同
    pub fn is_modified(&self) -> bool {
        self.current_value != self.original_value
    }

    /// 当前值尚未写入存储
    pub fn has_unsaved_changes(&self) -> bool {
        self.current_value != self.saved_value
    }

    /// 接受一次编辑：更新当前值并记录操作
    pub fn apply(&mut self, value: String, ops: impl IntoIterator<Item = Operation>) {
        self.current_value = value;
        for op in ops {
            self.change_log.append(op);
        }
    }

    pub fn mark_saved(&mut self) {
        self.saved_value = self.current_value.clone();
    }
}

/// 主菜单选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Edit,
    Remove,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Add,
        MenuAction::Edit,
        MenuAction::Remove,
        MenuAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Add => "Add",
            MenuAction::Edit => "Edit",
            MenuAction::Remove => "Remove",
            MenuAction::Quit => "Quit",
        }
    }
}

/// 退出确认子菜单选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    View,
    Save,
    Quit,
}

impl ConfirmAction {
    pub const ALL: [ConfirmAction; 3] = [ConfirmAction::View, ConfirmAction::Save, ConfirmAction::Quit];

    pub fn label(self) -> &'static str {
        match self {
            ConfirmAction::View => "View",
            ConfirmAction::Save => "Save",
            ConfirmAction::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Browsing,
    AwaitingAction,
    Confirming,
    Terminated,
}

/// 以表格显示当前条目（过滤空段），没有条目时显示提示
pub fn show_entries<C: Console + ?Sized>(console: &mut C, value: &str) -> anyhow::Result<()> {
    let entries = paths::entries(value);
    if entries.is_empty() {
        return console.show_text(NO_PATHS, TextStyle::Error);
    }

    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| vec![(i + 1).to_string(), entry.to_string()])
        .collect();
    console.show_table(&["Id", "Path"], &rows)
}

fn labels<T: Copy>(items: &[T], label: fn(T) -> &'static str) -> Vec<String> {
    items.iter().map(|&item| label(item).to_string()).collect()
}

/// 菜单状态机
pub struct InteractionLoop<'a, S: PathStore + ?Sized, C: Console + ?Sized> {
    store: &'a S,
    console: &'a mut C,
    session: Session,
}

impl<'a, S: PathStore + ?Sized, C: Console + ?Sized> InteractionLoop<'a, S, C> {
    pub fn new(store: &'a S, console: &'a mut C, session: Session) -> Self {
        Self {
            store,
            console,
            session,
        }
    }

    /// 从存储读取初始值
    ///
    /// # 返回
    /// 变量未设置时返回 `Ok(None)`，此时不应显示任何菜单
    pub fn from_store(store: &'a S, console: &'a mut C) -> anyhow::Result<Option<Self>> {
        let Some(value) = store.read()? else {
            tracing::info!(store = %store.describe(), "variable is not set; nothing to edit");
            return Ok(None);
        };

        tracing::info!(
            store = %store.describe(),
            entries = paths::entries(&value).len(),
            "loaded variable"
        );
        Ok(Some(Self::new(store, console, Session::new(value))))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// 运行直到用户选择退出
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut state = State::Browsing;
        while state != State::Terminated {
            state = self.step(state)?;
        }
        Ok(())
    }

    fn step(&mut self, state: State) -> anyhow::Result<State> {
        match state {
            State::Browsing => {
                show_entries(&mut *self.console, self.session.current())?;
                Ok(State::AwaitingAction)
            }
            State::AwaitingAction => self.await_action(),
            State::Confirming => self.confirm(),
            State::Terminated => Ok(State::Terminated),
        }
    }

    fn await_action(&mut self) -> anyhow::Result<State> {
        let index = self
            .console
            .select_one(MENU_TITLE, &labels(&MenuAction::ALL, MenuAction::label))?;

        match MenuAction::ALL[index] {
            MenuAction::Add => self.add(),
            MenuAction::Edit => self.edit(),
            MenuAction::Remove => self.remove(),
            MenuAction::Quit if self.session.is_modified() => Ok(State::Confirming),
            MenuAction::Quit => Ok(State::Terminated),
        }
    }

    fn prompt_new_path(&mut self) -> anyhow::Result<String> {
        Ok(self.console.prompt_text(NEW_PATH_LABEL)?.trim().to_string())
    }

    fn add(&mut self) -> anyhow::Result<State> {
        let entry = self.prompt_new_path()?;

        match paths::add(self.session.current(), &entry) {
            Ok(value) => {
                tracing::debug!(%entry, "added entry");
                self.session.apply(value, [Operation::add(&entry)]);
            }
            Err(e) => {
                tracing::debug!(error = %e, "add rejected");
                self.console.show_text("Failed to add path.", TextStyle::Error)?;
            }
        }
        Ok(State::Browsing)
    }

    fn edit(&mut self) -> anyhow::Result<State> {
        let entries: Vec<String> = paths::entries(self.session.current())
            .into_iter()
            .map(str::to_string)
            .collect();
        if entries.is_empty() {
            self.console.show_text(NO_PATHS, TextStyle::Error)?;
            return Ok(State::Browsing);
        }

        let index = self.console.select_one(SELECT_EDIT_TITLE, &entries)?;
        let old_entry = &entries[index];
        self.console
            .show_text(&format!("SELECTED PATH: [{old_entry}]"), TextStyle::Success)?;

        let new_entry = self.prompt_new_path()?;
        self.console
            .show_text(&format!("{old_entry} -> {new_entry}"), TextStyle::Plain)?;

        match paths::edit(self.session.current(), old_entry, &new_entry) {
            Ok(value) => {
                tracing::debug!(%old_entry, %new_entry, "edited entry");
                self.session
                    .apply(value, [Operation::edit(old_entry, &new_entry)]);
                self.console.wait_keypress(CONTINUE_PROMPT)?;
            }
            Err(e) => {
                tracing::debug!(error = %e, "edit rejected");
                self.console
                    .show_text("Failed to update the path.", TextStyle::Error)?;
            }
        }
        Ok(State::Browsing)
    }

    fn remove(&mut self) -> anyhow::Result<State> {
        let entries: Vec<String> = paths::entries(self.session.current())
            .into_iter()
            .map(str::to_string)
            .collect();

        let selected: Vec<&str> = self
            .console
            .select_many(SELECT_REMOVE_TITLE, &entries)?
            .into_iter()
            .map(|i| entries[i].as_str())
            .collect();

        if !selected.is_empty() {
            tracing::debug!(count = selected.len(), "removing entries");
            let value = paths::remove_many(self.session.current(), &selected);
            self.session
                .apply(value, selected.iter().map(|entry| Operation::remove(entry)));
        }
        Ok(State::Browsing)
    }

    fn confirm(&mut self) -> anyhow::Result<State> {
        let index = self
            .console
            .select_one(CONFIRM_TITLE, &labels(&ConfirmAction::ALL, ConfirmAction::label))?;

        match ConfirmAction::ALL[index] {
            ConfirmAction::View => {
                self.view_changes()?;
                Ok(State::Confirming)
            }
            ConfirmAction::Save => {
                match self.save()? {
                    Ok(()) => {
                        self.session.mark_saved();
                        self.console.show_text("Changes saved.", TextStyle::Success)?;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to save changes");
                        self.console
                            .show_text(&format!("Failed to save changes: {e}"), TextStyle::Error)?;
                    }
                }
                Ok(State::Confirming)
            }
            ConfirmAction::Quit => {
                if self.session.has_unsaved_changes() {
                    tracing::debug!(
                        changes = self.session.change_log().len(),
                        "discarding unsaved changes"
                    );
                }
                Ok(State::Terminated)
            }
        }
    }

    fn view_changes(&mut self) -> anyhow::Result<()> {
        self.console.show_text("Pending Changes:", TextStyle::Heading)?;

        let rows: Vec<Vec<String>> = self
            .session
            .change_log()
            .iter()
            .map(|op| {
                vec![
                    op.kind().label().to_string(),
                    op.description().to_string(),
                    op.recorded_at().format("%H:%M:%S").to_string(),
                ]
            })
            .collect();
        self.console.show_table(&["Action", "Path", "Time"], &rows)?;
        self.console.wait_keypress(CONTINUE_PROMPT)
    }

    /// 在后台线程写入存储，主线程显示进度直到写入结束
    fn save(&mut self) -> anyhow::Result<Result<(), PathError>> {
        let store = self.store;
        let value = self.session.current();
        let console = &mut *self.console;

        tracing::info!(store = %store.describe(), "saving changes");
        thread::scope(|scope| {
            let writer = scope.spawn(|| store.write(value));
            console.run_with_progress(SAVING_MESSAGE, &|| writer.is_finished())?;
            Ok(writer.join().unwrap_or(Err(PathError::WriterPanicked)))
        })
    }
}
