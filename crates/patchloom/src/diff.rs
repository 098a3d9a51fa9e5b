//! Line and character diffing for previews and diagnostics.
//!
//! The structural diff is classic minimum-edit-distance (Wagner–Fischer)
//! dynamic programming, reconstructed by backtracking from the end with a
//! fixed tie-break order (equal > substitution > deletion > insertion) so
//! operation choice is consistent across equal-cost paths. Rendered unified
//! diffs come from the `similar` crate. None of this is used inside
//! matching.

use similar::{ChangeTag, TextDiff};

use crate::types::{CharDiffEntry, CharDiffKind, LineDiffEntry, LineDiffKind};

/// Edit-distance table for two sequences under `eq`.
fn distance_table<T, F: Fn(&T, &T) -> bool>(old: &[T], new: &[T], eq: &F) -> Vec<Vec<usize>> {
    let n = old.len();
    let m = new.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let substitution = dp[i - 1][j - 1] + usize::from(!eq(&old[i - 1], &new[j - 1]));
            let deletion = dp[i - 1][j] + 1;
            let insertion = dp[i][j - 1] + 1;
            dp[i][j] = substitution.min(deletion).min(insertion);
        }
    }
    dp
}

/// Line-level diff between two line sequences.
///
/// Substitutions surface as [`LineDiffKind::Modify`] entries carrying both
/// sides, which is what diagnostics want when reporting "this line differs".
#[must_use]
pub fn line_diff(old_lines: &[&str], new_lines: &[&str]) -> Vec<LineDiffEntry> {
    let eq = |a: &&str, b: &&str| a == b;
    let dp = distance_table(old_lines, new_lines, &eq);
    let mut entries = Vec::new();
    let mut i = old_lines.len();
    let mut j = new_lines.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_lines[i - 1] == new_lines[j - 1] && dp[i][j] == dp[i - 1][j - 1] {
            entries.push(LineDiffEntry {
                kind: LineDiffKind::Equal,
                old_line: Some(old_lines[i - 1].to_string()),
                new_line: Some(new_lines[j - 1].to_string()),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + 1 {
            entries.push(LineDiffEntry {
                kind: LineDiffKind::Modify,
                old_line: Some(old_lines[i - 1].to_string()),
                new_line: Some(new_lines[j - 1].to_string()),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            entries.push(LineDiffEntry {
                kind: LineDiffKind::Delete,
                old_line: Some(old_lines[i - 1].to_string()),
                new_line: None,
            });
            i -= 1;
        } else {
            entries.push(LineDiffEntry {
                kind: LineDiffKind::Insert,
                old_line: None,
                new_line: Some(new_lines[j - 1].to_string()),
            });
            j -= 1;
        }
    }

    entries.reverse();
    entries
}

/// Character-level diff between two texts.
///
/// Substitutions decompose into delete + insert; the tie-break otherwise
/// mirrors [`line_diff`].
#[must_use]
pub fn char_diff(old_text: &str, new_text: &str) -> Vec<CharDiffEntry> {
    let old: Vec<char> = old_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();

    // Insert/delete only: a substitution would hide which character was
    // which, and callers render these as per-character spans.
    let n = old.len();
    let m = new.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dp[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            dp[i][j] = if old[i - 1] == new[j - 1] {
                dp[i - 1][j - 1]
            } else {
                (dp[i - 1][j] + 1).min(dp[i][j - 1] + 1)
            };
        }
    }

    let mut entries = Vec::new();
    let mut i = n;
    let mut j = m;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] && dp[i][j] == dp[i - 1][j - 1] {
            entries.push(CharDiffEntry {
                kind: CharDiffKind::Equal,
                value: old[i - 1],
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            entries.push(CharDiffEntry {
                kind: CharDiffKind::Delete,
                value: old[i - 1],
            });
            i -= 1;
        } else {
            entries.push(CharDiffEntry {
                kind: CharDiffKind::Insert,
                value: new[j - 1],
            });
            j -= 1;
        }
    }

    entries.reverse();
    entries
}

/// Generate a rendered unified diff between two strings.
///
/// Uses the `similar` crate for line-by-line diffing with three lines of
/// context; intended for host preview UIs.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}
