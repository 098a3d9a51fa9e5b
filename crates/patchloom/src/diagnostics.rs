//! Mismatch diagnostics.
//!
//! When a search block matches nowhere, these helpers find the file windows
//! that look most like it and explain how they differ, so a caller can ask
//! for a corrected patch. Purely advisory; nothing here ever applies an
//! edit.

use std::collections::HashMap;

use tracing::debug;

use crate::diff::line_diff;
use crate::newline;
use crate::types::{Candidate, LineDiffKind, RepairHint};

/// Default minimum similarity (0-100) for reported candidates.
pub const DEFAULT_MIN_SIMILARITY: u32 = 50;

/// Maximum number of candidates reported.
const MAX_CANDIDATES: usize = 5;

/// Minimum physical-line distance between two reported candidates.
const MIN_CANDIDATE_GAP: usize = 3;

/// Non-whitespace character frequency map of a slice of lines.
fn char_frequency(lines: &[&str]) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for line in lines {
        for c in line.chars().filter(|c| !c.is_whitespace()) {
            *freq.entry(c).or_insert(0) += 1;
        }
    }
    freq
}

/// Character-overlap similarity between two frequency maps, 0-100.
///
/// Cheap by design: it ranks windows, it does not prove a match.
fn overlap_score(a: &HashMap<char, usize>, b: &HashMap<char, usize>) -> u32 {
    let total_a: usize = a.values().sum();
    let total_b: usize = b.values().sum();
    if total_a + total_b == 0 {
        return 100;
    }
    let shared: usize = a
        .iter()
        .map(|(c, &n)| n.min(b.get(c).copied().unwrap_or(0)))
        .sum();
    #[allow(clippy::cast_possible_truncation)]
    let score = (200 * shared / (total_a + total_b)) as u32;
    score
}

/// Strip leading/trailing blank lines from a block's physical lines.
fn trim_blank_edges<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let mut lo = 0;
    let mut hi = lines.len();
    while lo < hi && lines[lo].trim().is_empty() {
        lo += 1;
    }
    while hi > lo && lines[hi - 1].trim().is_empty() {
        hi -= 1;
    }
    &lines[lo..hi]
}

/// Rank file windows by similarity to a search block that failed to match.
///
/// Returns up to five candidates scoring at least `min_similarity`, kept at
/// least three lines apart so one hot region does not crowd out the rest.
#[must_use]
pub fn find_candidates(
    search_block: &str,
    file_content: &str,
    min_similarity: u32,
) -> Vec<Candidate> {
    let search_normalized = newline::normalize(search_block);
    let file_normalized = newline::normalize(file_content);
    let search_all: Vec<&str> = search_normalized.split('\n').collect();
    let search_lines = trim_blank_edges(&search_all);
    let file_lines: Vec<&str> = file_normalized.split('\n').collect();

    if search_lines.is_empty() || file_lines.len() < search_lines.len() {
        return Vec::new();
    }

    let search_freq = char_frequency(search_lines);
    let window = search_lines.len();

    let mut scored: Vec<(usize, u32)> = (0..=(file_lines.len() - window))
        .map(|at| {
            let freq = char_frequency(&file_lines[at..at + window]);
            (at, overlap_score(&search_freq, &freq))
        })
        .filter(|&(_, score)| score >= min_similarity)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut candidates: Vec<Candidate> = Vec::new();
    for (at, score) in scored {
        if candidates.len() == MAX_CANDIDATES {
            break;
        }
        let too_close = candidates
            .iter()
            .any(|c| at.abs_diff(c.start_line - 1) < MIN_CANDIDATE_GAP);
        if too_close {
            continue;
        }
        candidates.push(Candidate {
            start_line: at + 1,
            end_line: at + window,
            similarity: score,
            lines: file_lines[at..at + window]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        });
    }

    debug!(
        count = candidates.len(),
        min_similarity, "candidate windows ranked"
    );
    candidates
}

/// Explain how a candidate differs from the search block.
///
/// Reports which of the candidate's lines differ, whether every difference
/// is whitespace-only, and the candidate's verbatim text as a corrected
/// search block.
#[must_use]
pub fn repair_hint(search_block: &str, candidate: &Candidate) -> RepairHint {
    let search_normalized = newline::normalize(search_block);
    let search_all: Vec<&str> = search_normalized.split('\n').collect();
    let search_lines = trim_blank_edges(&search_all);
    let candidate_lines: Vec<&str> = candidate.lines.iter().map(String::as_str).collect();

    let entries = line_diff(search_lines, &candidate_lines);
    let mut differing = Vec::new();
    let mut whitespace_only = true;
    let mut candidate_line = candidate.start_line;

    for entry in &entries {
        match entry.kind {
            LineDiffKind::Equal => candidate_line += 1,
            LineDiffKind::Modify => {
                differing.push(candidate_line);
                let old = entry.old_line.as_deref().unwrap_or("");
                let new = entry.new_line.as_deref().unwrap_or("");
                if old.split_whitespace().collect::<Vec<_>>()
                    != new.split_whitespace().collect::<Vec<_>>()
                {
                    whitespace_only = false;
                }
                candidate_line += 1;
            }
            LineDiffKind::Insert => {
                differing.push(candidate_line);
                if !entry.new_line.as_deref().unwrap_or("").trim().is_empty() {
                    whitespace_only = false;
                }
                candidate_line += 1;
            }
            LineDiffKind::Delete => {
                differing.push(candidate_line);
                if !entry.old_line.as_deref().unwrap_or("").trim().is_empty() {
                    whitespace_only = false;
                }
            }
        }
    }

    RepairHint {
        differing_lines: differing,
        whitespace_only,
        suggested_search: candidate.lines.join("\n"),
    }
}
