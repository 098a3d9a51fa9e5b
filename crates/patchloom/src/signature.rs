//! Logical signature builder.
//!
//! Reduces text to a whitespace-normalized, blank-line-free comparison form.
//! The same reduction is applied to the file and to the search block, so
//! pure-whitespace differences can never affect matching.

use crate::newline;
use crate::types::LogicalLine;

/// Column width of a tab stop when expanding indentation.
pub const TAB_WIDTH: usize = 4;

/// Zero-width and invisible characters stripped before comparison.
///
/// These show up in AI-generated blocks copied through rich-text pipelines
/// and would otherwise defeat exact content comparison.
const INVISIBLE_CHARS: [char; 5] = [
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // BOM / zero width no-break space
];

/// Width in columns of a line's leading whitespace, tabs expanded to
/// [`TAB_WIDTH`].
#[must_use]
pub fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_WIDTH,
            _ => break,
        }
    }
    width
}

/// Strip invisible characters and trailing whitespace from one line.
fn clean_line(line: &str) -> String {
    let stripped: String = line
        .chars()
        .filter(|c| !INVISIBLE_CHARS.contains(c))
        .collect();
    stripped.trim_end().to_string()
}

/// Build the logical signature of `text`.
///
/// Normalizes CRLF to LF, splits on LF, strips invisible characters per
/// line, collapses every whitespace run to a single space, records
/// indentation width, and drops lines that are empty after trimming.
/// Pure, O(n). Whitespace runs inside a line carry no token information,
/// so collapsing them makes intra-line spacing drift invisible to matching.
#[must_use]
pub fn signature(text: &str) -> Vec<LogicalLine> {
    let normalized = newline::normalize(text);
    let mut lines = Vec::new();
    for (index, raw) in normalized.split('\n').enumerate() {
        let cleaned = clean_line(raw);
        let content = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        if content.is_empty() {
            continue;
        }
        lines.push(LogicalLine {
            content,
            indent: indent_width(&cleaned),
            original_index: index,
        });
    }
    lines
}

/// True when two signatures carry identical logical content, ignoring
/// indentation and source positions.
#[must_use]
pub fn same_content(a: &[LogicalLine], b: &[LogicalLine]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| x.content == y.content)
}
