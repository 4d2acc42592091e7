//! Plain-text rendering for the terminal: tables, the menu tree and
//! notices.

use dashboard::list::TableProjection;
use dashboard::menu::NavNode;
use dashboard::notify::{Notice, NoticeLevel, Notifier};
use dashboard::{NavMenu, Registry};

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

/// Column-aligned table with a title line and a header rule. Widths are
/// counted in chars so accented labels line up.
pub fn table(title: &str, table: &TableProjection) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    push_row(&mut out, table.headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &table.rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if table.rows.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Indented menu tree; leaves show their route.
pub fn menu(menu: &NavMenu) -> String {
    let mut out = String::new();
    for node in menu.roots() {
        push_node(&mut out, node, 0);
    }
    out
}

fn push_node(out: &mut String, node: &NavNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        NavNode::Leaf(leaf) => {
            out.push_str(&format!("{indent}{}  {}\n", leaf.label, leaf.route));
        }
        NavNode::Group(group) => {
            out.push_str(&indent);
            out.push_str(group.label);
            out.push('\n');
            for child in &group.children {
                push_node(out, child, depth + 1);
            }
        }
    }
}

/// One line per resource: name, route and endpoint.
pub fn resources(registry: &Registry) -> String {
    let width = registry.iter().map(|r| r.name.len()).max().unwrap_or(0);
    registry
        .iter()
        .map(|r| format!("{:<width$}  {}  ({})\n", r.name, r.route, r.path))
        .collect()
}

/// Prints notices on stderr, keeping stdout for data.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice_line(&notice));
    }
}

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}
