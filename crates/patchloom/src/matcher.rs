//! Exact/strict signature matching and the fuzzy fallback.
//!
//! The exact matcher slides a search signature over a file signature and
//! requires pairwise-identical logical content. Strict indent mode adds a
//! proportional-indentation constraint for indentation-significant
//! languages, rejecting blocks that match textually but sit at the wrong
//! nesting depth. The fuzzy matcher is a trimmed physical-line fallback used
//! only when signature matching finds nothing.

use tracing::trace;

use crate::types::{LogicalLine, MatchResult};

/// Relative tolerance for the strict-indent scale factor.
const INDENT_SCALE_TOLERANCE: f64 = 0.01;

/// True when the window of `file_sig` starting at `at` matches `search_sig`.
fn window_matches(
    file_sig: &[LogicalLine],
    search_sig: &[LogicalLine],
    at: usize,
    strict_indent: bool,
) -> bool {
    let window = &file_sig[at..at + search_sig.len()];
    if window
        .iter()
        .zip(search_sig.iter())
        .any(|(f, s)| f.content != s.content)
    {
        return false;
    }
    if strict_indent {
        return indent_deltas_consistent(window, search_sig);
    }
    true
}

/// Check the strict-indent constraint between a file window and the search
/// signature.
///
/// Each line's indent delta relative to the block's first line must have the
/// same sign on both sides, and all non-zero delta pairs must share one
/// scale factor (within [`INDENT_SCALE_TOLERANCE`]). A zero relative indent
/// in the search block must be zero in the file too.
fn indent_deltas_consistent(window: &[LogicalLine], search_sig: &[LogicalLine]) -> bool {
    let file_base = window[0].indent as isize;
    let search_base = search_sig[0].indent as isize;
    let mut scale: Option<f64> = None;

    for (f, s) in window.iter().zip(search_sig.iter()).skip(1) {
        let fd = f.indent as isize - file_base;
        let sd = s.indent as isize - search_base;
        if sd == 0 {
            if fd != 0 {
                return false;
            }
            continue;
        }
        if fd == 0 || fd.signum() != sd.signum() {
            return false;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = fd.abs() as f64 / sd.abs() as f64;
        match scale {
            None => scale = Some(ratio),
            Some(expected) => {
                if (ratio - expected).abs() > expected * INDENT_SCALE_TOLERANCE {
                    return false;
                }
            }
        }
    }
    true
}

/// Count occurrences of `search_sig` inside `file_sig`. O(n·m).
#[must_use]
pub fn count_matches(
    file_sig: &[LogicalLine],
    search_sig: &[LogicalLine],
    strict_indent: bool,
) -> usize {
    if search_sig.is_empty() || file_sig.len() < search_sig.len() {
        return 0;
    }
    let mut count = 0;
    for at in 0..=(file_sig.len() - search_sig.len()) {
        if window_matches(file_sig, search_sig, at, strict_indent) {
            trace!(at, "signature window matched");
            count += 1;
        }
    }
    count
}

/// Find the first occurrence of `search_sig` inside `file_sig`.
///
/// Returns the *logical* index into `file_sig`; callers map it back to
/// physical lines through [`LogicalLine::original_index`].
#[must_use]
pub fn find_first_match(
    file_sig: &[LogicalLine],
    search_sig: &[LogicalLine],
    strict_indent: bool,
) -> Option<usize> {
    if search_sig.is_empty() || file_sig.len() < search_sig.len() {
        return None;
    }
    (0..=(file_sig.len() - search_sig.len()))
        .find(|&at| window_matches(file_sig, search_sig, at, strict_indent))
}

/// Physical line span (0-indexed, inclusive) of the logical window starting
/// at `logical_index` and spanning `len` logical lines.
#[must_use]
pub fn physical_span(file_sig: &[LogicalLine], logical_index: usize, len: usize) -> (usize, usize) {
    let start = file_sig[logical_index].original_index;
    let end = file_sig[logical_index + len - 1].original_index;
    (start, end)
}

/// Locate `search_sig` inside `file_sig` in one pass.
///
/// Returns the physical span of the *first* occurrence together with the
/// total occurrence count, or `None` when the search block matches nowhere.
/// Automatic application requires `match_count == 1`; anything higher is
/// the caller's ambiguity signal.
#[must_use]
pub fn locate(
    file_sig: &[LogicalLine],
    search_sig: &[LogicalLine],
    strict_indent: bool,
) -> Option<MatchResult> {
    let match_count = count_matches(file_sig, search_sig, strict_indent);
    if match_count == 0 {
        return None;
    }
    let at = find_first_match(file_sig, search_sig, strict_indent)?;
    let (start_line, end_line) = physical_span(file_sig, at, search_sig.len());
    Some(MatchResult {
        start_line,
        end_line,
        match_count,
    })
}

/// Fuzzy fallback: find windows of *physical* lines equal to the search
/// lines after trimming each line.
///
/// Blank lines must correspond one-to-one, and no strict-indent ratio is
/// applied. Returns `(start, len)` physical spans, 0-indexed; `len` is the
/// search block's line count after dropping its blank edges.
#[must_use]
pub fn find_fuzzy_matches(file_lines: &[&str], search_lines: &[&str]) -> Vec<(usize, usize)> {
    // Leading/trailing blank lines in the block carry no anchor value.
    let mut lo = 0;
    let mut hi = search_lines.len();
    while lo < hi && search_lines[lo].trim().is_empty() {
        lo += 1;
    }
    while hi > lo && search_lines[hi - 1].trim().is_empty() {
        hi -= 1;
    }
    let needle = &search_lines[lo..hi];
    if needle.is_empty() || file_lines.len() < needle.len() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for at in 0..=(file_lines.len() - needle.len()) {
        let hit = file_lines[at..at + needle.len()]
            .iter()
            .zip(needle.iter())
            .all(|(f, s)| f.trim() == s.trim());
        if hit {
            trace!(at, "fuzzy window matched");
            matches.push((at, needle.len()));
        }
    }
    matches
}
