/// 基于 crossterm 的终端实现
///
/// 选择类提示使用 raw mode 读取方向键；文本输入使用行缓冲的标准输入。
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use anyhow::bail;
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use super::table::render_table;
use super::traits::{Console, TextStyle};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);
const MULTI_SELECT_HINT: &str = "(Press <space> to select a path, <enter> to accept)";

/// 离开作用域时恢复终端状态（退出 raw mode、显示光标）
struct ScreenGuard {
    raw: bool,
}

impl ScreenGuard {
    fn raw() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Hide)?;
        Ok(Self { raw: true })
    }

    fn hidden_cursor() -> io::Result<Self> {
        execute!(io::stdout(), Hide)?;
        Ok(Self { raw: false })
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.raw {
            let _ = terminal::disable_raw_mode();
        }
        let _ = execute!(io::stdout(), Show);
    }
}

enum Key {
    Up,
    Down,
    Toggle,
    Accept,
    Interrupt,
    Other,
}

fn read_key() -> io::Result<Key> {
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        // Windows 上按键抬起也会产生事件
        if kind != KeyEventKind::Press {
            continue;
        }

        return Ok(match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Up | KeyCode::Char('k') => Key::Up,
            KeyCode::Down | KeyCode::Char('j') => Key::Down,
            KeyCode::Char(' ') => Key::Toggle,
            KeyCode::Enter => Key::Accept,
            _ => Key::Other,
        });
    }
}

/// 真实终端
pub struct TerminalConsole {
    out: Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    /// 可见的列表行数（为标题和提示留出空间）
    fn page_size() -> usize {
        terminal::size()
            .map(|(_, rows)| (rows as usize).saturating_sub(4))
            .unwrap_or(20)
            .max(3)
    }

    /// 绘制列表的可见部分，返回绘制的行数
    fn draw_choices(
        &mut self,
        choices: &[String],
        cursor: usize,
        top: usize,
        checked: Option<&[bool]>,
    ) -> io::Result<u16> {
        let page = Self::page_size();
        let mut lines = 0u16;

        for (i, choice) in choices.iter().enumerate().skip(top).take(page) {
            let pointer = if i == cursor { ">" } else { " " };
            let mark = match checked {
                Some(checked) if checked[i] => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            let line = format!("{pointer} {mark}{choice}");

            if i == cursor {
                queue!(self.out, PrintStyledContent(line.blue()), Print("\r\n"))?;
            } else {
                queue!(self.out, Print(line), Print("\r\n"))?;
            }
            lines += 1;
        }

        if checked.is_some() {
            queue!(self.out, PrintStyledContent(MULTI_SELECT_HINT.dark_grey()), Print("\r\n"))?;
            lines += 1;
        }

        self.out.flush()?;
        Ok(lines)
    }

    /// 单选与多选共用的按键循环
    fn run_list(
        &mut self,
        title: &str,
        choices: &[String],
        mut checked: Option<Vec<bool>>,
    ) -> anyhow::Result<(usize, Option<Vec<bool>>)> {
        writeln!(self.out, "{}", title.bold())?;

        let _guard = ScreenGuard::raw()?;
        let page = Self::page_size();
        let mut cursor = 0usize;
        let mut top = 0usize;
        let mut drawn = 0u16;

        loop {
            if drawn > 0 {
                queue!(self.out, MoveUp(drawn), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
            }
            drawn = self.draw_choices(choices, cursor, top, checked.as_deref())?;

            match read_key()? {
                Key::Up => cursor = cursor.checked_sub(1).unwrap_or(choices.len() - 1),
                Key::Down => cursor = (cursor + 1) % choices.len(),
                Key::Toggle => {
                    if let Some(checked) = checked.as_mut() {
                        checked[cursor] = !checked[cursor];
                    }
                }
                Key::Accept => break,
                Key::Interrupt => {
                    execute!(self.out, MoveUp(drawn), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
                    bail!("Interrupted");
                }
                Key::Other => {}
            }

            if cursor < top {
                top = cursor;
            } else if cursor >= top + page {
                top = cursor + 1 - page;
            }
        }

        execute!(self.out, MoveUp(drawn), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        Ok((cursor, checked))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn select_one(&mut self, title: &str, choices: &[String]) -> anyhow::Result<usize> {
        if choices.is_empty() {
            bail!("Nothing to select for '{title}'");
        }

        let (index, _) = self.run_list(title, choices, None)?;
        writeln!(self.out, "{}", choices[index].as_str().green())?;
        Ok(index)
    }

    fn select_many(&mut self, title: &str, choices: &[String]) -> anyhow::Result<Vec<usize>> {
        if choices.is_empty() {
            return Ok(Vec::new());
        }

        let (_, checked) = self.run_list(title, choices, Some(vec![false; choices.len()]))?;
        let selected: Vec<usize> = checked
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect();

        for &i in &selected {
            writeln!(self.out, "{}", choices[i].as_str().green())?;
        }
        Ok(selected)
    }

    fn prompt_text(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.out, "{} ", label.bold())?;
        self.out.flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            bail!("Input stream closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()> {
        let width = terminal::size().map(|(cols, _)| cols as usize).unwrap_or(0);

        for (i, line) in render_table(headers, rows, width).iter().enumerate() {
            if i == 1 {
                writeln!(self.out, "{}", line.as_str().bold())?;
            } else {
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    fn show_text(&mut self, text: &str, style: TextStyle) -> anyhow::Result<()> {
        match style {
            TextStyle::Plain => writeln!(self.out, "{text}")?,
            TextStyle::Heading => writeln!(self.out, "{}", text.bold().yellow())?,
            TextStyle::Success => writeln!(self.out, "{}", text.bold().green())?,
            TextStyle::Error => writeln!(self.out, "{}", text.bold().red())?,
        }
        Ok(())
    }

    fn wait_keypress(&mut self, prompt: &str) -> anyhow::Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let key = {
            let _guard = ScreenGuard::raw()?;
            read_key()?
        };
        writeln!(self.out)?;

        if matches!(key, Key::Interrupt) {
            bail!("Interrupted");
        }
        Ok(())
    }

    fn run_with_progress(&mut self, message: &str, is_done: &dyn Fn() -> bool) -> anyhow::Result<()> {
        let _guard = ScreenGuard::hidden_cursor()?;

        for frame in SPINNER_FRAMES.iter().cycle() {
            if is_done() {
                break;
            }
            queue!(
                self.out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                PrintStyledContent(frame.green().dim()),
                Print(" "),
                Print(message)
            )?;
            self.out.flush()?;
            thread::sleep(SPINNER_INTERVAL);
        }

        execute!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        Ok(())
    }
}
