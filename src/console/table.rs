//! 表格排版
//!
//! 生成带边框的表格文本行。`min_width` 大于自然宽度时，最后一列被拉伸填满。

/// 排版表格，返回逐行文本（不含换行符）
pub fn render_table(headers: &[&str], rows: &[Vec<String>], min_width: usize) -> Vec<String> {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    // 每列左右各一个空格，加上 columns + 1 条竖线
    let natural: usize = widths.iter().map(|w| w + 2).sum::<usize>() + columns + 1;
    if let Some(last) = widths.last_mut() {
        if min_width > natural {
            *last += min_width - natural;
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border_line(&widths, '┌', '┬', '┐'));
    lines.push(row_line(&widths, headers.iter().copied()));
    lines.push(border_line(&widths, '├', '┼', '┤'));
    for row in rows {
        lines.push(row_line(&widths, row.iter().map(String::as_str)));
    }
    lines.push(border_line(&widths, '└', '┴', '┘'));
    lines
}

fn border_line(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            line.push(mid);
        }
        line.push_str(&"─".repeat(w + 2));
    }
    line.push(right);
    line
}

fn row_line<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("│");
    for &w in widths {
        let cell = cells.next().unwrap_or("");
        let pad = w - cell.chars().count().min(w);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('│');
    }
    line
}
