//! Indentation realigner.
//!
//! AI-generated replacement blocks carry their own (sometimes inconsistent)
//! indentation convention. Instead of copying it verbatim, the realigner
//! re-derives each replacement line's indent *level* relative to its own
//! block and re-emits it in the target file's convention, based at the
//! match location's depth.

use crate::signature::{TAB_WIDTH, indent_width};

/// The indentation convention of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentUnit {
    /// The text of one indentation step (a tab, or 2/4 spaces).
    pub text: String,
    /// Column width of one step.
    pub width: usize,
}

/// Infer the file's indentation unit.
///
/// Tab-indented files win outright; otherwise the statistically dominant
/// 2- or 4-space increment among adjacent indented lines decides, with
/// 4 spaces as the default for files that never reveal a preference.
#[must_use]
pub fn infer_unit(file_lines: &[&str]) -> IndentUnit {
    if file_lines
        .iter()
        .any(|line| line.starts_with('\t'))
    {
        return IndentUnit {
            text: "\t".to_string(),
            width: TAB_WIDTH,
        };
    }

    let mut twos = 0usize;
    let mut fours = 0usize;
    let mut previous: Option<usize> = None;
    for line in file_lines {
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_width(line);
        if let Some(prev) = previous {
            let delta = indent.abs_diff(prev);
            match delta {
                2 => twos += 1,
                4 => fours += 1,
                _ => {}
            }
        }
        previous = Some(indent);
    }

    let width = if twos > fours { 2 } else { 4 };
    IndentUnit {
        text: " ".repeat(width),
        width,
    }
}

/// Most frequent non-zero adjacent-line indent delta inside a block.
///
/// This is the block's *own* unit, which may differ from the file's.
fn block_unit(lines: &[&str], fallback: usize) -> usize {
    let mut counts: Vec<(usize, usize)> = Vec::new();
    let mut previous: Option<usize> = None;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let indent = indent_width(line);
        if let Some(prev) = previous {
            let delta = indent.abs_diff(prev);
            if delta > 0 {
                match counts.iter_mut().find(|(d, _)| *d == delta) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((delta, 1)),
                }
            }
        }
        previous = Some(indent);
    }
    counts
        .into_iter()
        .max_by_key(|&(_, n)| n)
        .map_or(fallback, |(d, _)| d)
}

/// Indent width of a block's first non-blank line.
fn first_indent(lines: &[&str]) -> usize {
    lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .map_or(0, |line| indent_width(line))
}

/// Round a signed delta to the nearest whole number of `unit` steps.
fn levels(delta: isize, unit: usize) -> isize {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let rounded = (delta as f64 / unit as f64).round() as isize;
    rounded
}

/// True when a line that starts with `*` reads as a multiplication
/// expression rather than a block-comment continuation.
///
/// Heuristic: after the star (and any spaces) a digit or `(` means
/// arithmetic; a word, `/`, another `*`, or nothing means a comment.
fn looks_like_multiplication(content: &str) -> bool {
    let rest = content.trim_start_matches('*').trim_start();
    matches!(rest.chars().next(), Some(c) if c.is_ascii_digit() || c == '(')
}

/// Realign `replace_lines` onto the file's indentation convention.
///
/// `match_start` is the 0-indexed physical line where the matched span
/// begins; its indentation defines the base level. Replacement lines keep
/// their level structure relative to their own first non-blank line, shifted
/// by however much deeper or shallower the replacement block starts compared
/// to the search block. Levels are clamped at zero.
#[must_use]
pub fn align(
    file_lines: &[&str],
    match_start: usize,
    search_lines: &[&str],
    replace_lines: &[&str],
) -> Vec<String> {
    let unit = infer_unit(file_lines);
    let base = indent_width(file_lines.get(match_start).copied().unwrap_or("")) / unit.width;

    let source_unit = block_unit(replace_lines, block_unit(search_lines, unit.width));
    let replace_base = first_indent(replace_lines);
    let search_base = first_indent(search_lines);
    // A replacement block that opens deeper (or shallower) than the search
    // block keeps that offset relative to the match site.
    let offset = levels(replace_base as isize - search_base as isize, source_unit);

    let mut out = Vec::with_capacity(replace_lines.len());
    for line in replace_lines {
        let content = line.trim();
        if content.is_empty() {
            out.push(String::new());
            continue;
        }
        let relative = levels(indent_width(line) as isize - replace_base as isize, source_unit);
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let level = (base as isize + offset + relative).max(0) as usize;
        let mut prefix = unit.text.repeat(level);
        if content.starts_with('*') && !looks_like_multiplication(content) {
            // Block-comment continuations sit one column past the opener.
            prefix.push(' ');
        }
        out.push(format!("{prefix}{content}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_tab_unit() {
        let lines = vec!["fn main() {", "\tfoo();", "}"];
        assert_eq!(infer_unit(&lines).text, "\t");
    }

    #[test]
    fn test_infer_two_space_unit() {
        let lines = vec!["a:", "  b:", "    c: 1", "  d: 2"];
        let unit = infer_unit(&lines);
        assert_eq!(unit.width, 2);
    }

    #[test]
    fn test_infer_defaults_to_four() {
        let lines = vec!["flat", "also flat"];
        assert_eq!(infer_unit(&lines).width, 4);
    }

    #[test]
    fn test_align_rebases_to_file_convention() {
        // Tab-indented replacement lands in a 4-space file.
        let file = vec!["def f():", "    return 1"];
        let search = vec!["\treturn 1"];
        let replace = vec!["\treturn 2"];
        let aligned = align(&file, 1, &search, &replace);
        assert_eq!(aligned, vec!["    return 2".to_string()]);
    }

    #[test]
    fn test_align_preserves_relative_structure() {
        let file = vec!["fn f() {", "    body();", "}"];
        let search = vec!["body();"];
        let replace = vec!["if x {", "  inner();", "}"];
        let aligned = align(&file, 1, &search, &replace);
        assert_eq!(
            aligned,
            vec![
                "    if x {".to_string(),
                "        inner();".to_string(),
                "    }".to_string(),
            ]
        );
    }

    #[test]
    fn test_align_comment_continuation_gets_space() {
        let file = vec!["    /** doc */"];
        let aligned = align(&file, 0, &["/**"], &["/**", "* note", "*/"]);
        assert_eq!(aligned[1], "     * note");
        assert_eq!(aligned[2], "     */");
    }

    #[test]
    fn test_align_multiplication_star_untouched() {
        let file = vec!["    x"];
        let aligned = align(&file, 0, &["x"], &["a", "* 2;"]);
        assert_eq!(aligned[1], "    * 2;");
    }

    #[test]
    fn test_align_clamps_at_zero() {
        let file = vec!["top"];
        let aligned = align(&file, 0, &["        deep"], &["shallow"]);
        assert_eq!(aligned, vec!["shallow".to_string()]);
    }
}
