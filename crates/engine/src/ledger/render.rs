//! Fixed-width table rendering for the run summary

use super::LedgerEntry;

const USER_WIDTH: usize = 10;
const ACTION_WIDTH: usize = 14;
const MESSAGE_WIDTH: usize = 40;

/// Render the header line followed by the bordered table.
pub(super) fn table(header: &str, entries: &[LedgerEntry]) -> String {
    let border = border();
    let mut lines = Vec::with_capacity(entries.len() * 2 + 4);

    lines.push(header.to_string());
    lines.push(border.clone());
    lines.push(row("USER", "ACTION", &center("MESSAGE", MESSAGE_WIDTH)));
    for entry in entries {
        lines.push(border.clone());
        lines.push(row(
            &entry.identity,
            entry.action.tag(),
            &left(&entry.message, MESSAGE_WIDTH),
        ));
    }
    lines.push(border);

    lines.join("\n")
}

fn border() -> String {
    format!(
        "|{}+{}+{}+",
        "-".repeat(USER_WIDTH),
        "-".repeat(ACTION_WIDTH),
        "-".repeat(MESSAGE_WIDTH)
    )
}

fn row(user: &str, action: &str, message: &str) -> String {
    format!(
        "|{}|{}|{}|",
        center(user, USER_WIDTH),
        center(action, ACTION_WIDTH),
        message
    )
}

/// Centre `text` in `width` columns, growing on alternating sides.
///
/// An even length grows on the right and an odd length on the left, so
/// odd-length text sits one column right of centre. Text wider than `width`
/// is returned unchanged.
fn center(text: &str, width: usize) -> String {
    let mut len = text.chars().count();
    let mut left = 0;
    let mut right = 0;
    while len < width {
        if len % 2 == 1 {
            left += 1;
        } else {
            right += 1;
        }
        len += 1;
    }
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(pad))
}
