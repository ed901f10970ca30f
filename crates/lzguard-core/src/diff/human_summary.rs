//! Human-readable summary renderer for configuration diffs.

use crate::diff::model::{ArrayItemChange, DiffEntry};
use crate::value::{ConfigValue, Path};

/// Render a human-readable Markdown/text summary of a diff.
///
/// One line per entry: `+` added, `~` edited, `-` deleted, and `[i]` for a
/// change to the element at index `i` of a list. The summary is informational
/// only and does not affect the structured diff.
pub fn render_human_summary(entries: &[DiffEntry]) -> String {
    let mut out = String::new();
    out.push_str("## Config Diff\n\n");

    if entries.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str(&format!("**Changes**: {}\n\n", entries.len()));
    out.push_str("```text\n");
    for entry in entries {
        out.push_str(&render_line(entry));
        out.push('\n');
    }
    out.push_str("```\n");
    out
}

fn render_line(entry: &DiffEntry) -> String {
    match entry {
        DiffEntry::Added { path, rhs } => format!("+ {}: {}", location(path), short(rhs)),
        DiffEntry::Edited { path, lhs, rhs } => {
            format!("~ {}: {} -> {}", location(path), short(lhs), short(rhs))
        }
        DiffEntry::Deleted { path, lhs } => format!("- {}: {}", location(path), short(lhs)),
        DiffEntry::ArrayChanged { path, index, item } => {
            let change = match item {
                ArrayItemChange::Added { rhs } => format!("+ {}", short(rhs)),
                ArrayItemChange::Deleted { lhs } => format!("- {}", short(lhs)),
                ArrayItemChange::Edited { lhs, rhs } => {
                    format!("~ {} -> {}", short(lhs), short(rhs))
                }
            };
            format!("[{}] {}: {}", index, location(path), change)
        }
    }
}

fn location(path: &Path) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.render()
    }
}

/// Inline value, cut to 60 characters
fn short(value: &ConfigValue) -> String {
    let rendered = value.render();
    match rendered.char_indices().nth(60) {
        Some((end, _)) => format!("{}...", &rendered[..end]),
        None => rendered,
    }
}
