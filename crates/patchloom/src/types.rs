//! Core types for patch application.
//!
//! Defines the data structures used throughout the patching pipeline. All
//! outcome and diagnostic types derive `Serialize` so hosts can ship them
//! across a process or protocol boundary.

use serde::Serialize;

/// A single non-blank line in a logical signature.
///
/// Carries the whitespace-normalized content together with the indentation
/// width it had in the source text and the physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalLine {
    /// Trimmed content with whitespace runs collapsed; never empty by
    /// invariant.
    pub content: String,
    /// Leading-whitespace width in columns (tabs expanded to width 4).
    pub indent: usize,
    /// 0-indexed physical line number in the source text.
    pub original_index: usize,
}

/// One SEARCH/REPLACE edit request; immutable per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest<'a> {
    /// Path of the file being patched. Used only for language
    /// classification; the engine never opens it.
    pub file_path: &'a str,
    /// The block the AI claims is currently in the file.
    pub search_text: &'a str,
    /// The block that should replace it.
    pub replace_text: &'a str,
}

/// Physical location of a signature match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// First physical line of the matched span (0-indexed).
    pub start_line: usize,
    /// Last physical line of the matched span (0-indexed, inclusive).
    pub end_line: usize,
    /// Total number of signature matches found in the file.
    ///
    /// Automatic application requires exactly 1.
    pub match_count: usize,
}

/// Result of one patch application attempt.
///
/// Every variant is a legitimate outcome; none of them is an `Err`. Callers
/// branch on the variant, surface diagnostics, and decide retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PatchOutcome {
    /// The edit was applied at exactly one location.
    Success {
        /// Full patched file content, in the file's original line-ending
        /// convention.
        patched_content: String,
        /// 1-indexed physical line where the match started.
        match_line: usize,
        /// Number of physical lines the match consumed.
        line_count: usize,
    },
    /// No structural match for the search block anywhere in the file.
    NotFound,
    /// The replacement is already present and the search block is gone.
    ///
    /// Treated as non-error success: re-applying the same patch is a no-op.
    AlreadyApplied,
    /// The search block matches at two or more locations; never resolved
    /// automatically.
    Ambiguous {
        /// Number of equally valid match locations.
        match_count: usize,
    },
    /// The edit applied mechanically but the result fails the structural
    /// validator. Force-applying is the caller's decision.
    SyntaxError {
        /// Human-readable description with a 1-based line/column position.
        message: String,
        /// The spliced content, still available for force-apply.
        patched_content_anyway: String,
    },
}

/// Kind of a line-level diff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDiffKind {
    /// Line present and identical on both sides.
    Equal,
    /// Line present only on the new side.
    Insert,
    /// Line present only on the old side.
    Delete,
    /// Line present on both sides with different content.
    Modify,
}

/// One entry of a line-level diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiffEntry {
    /// How the two sides relate at this position.
    pub kind: LineDiffKind,
    /// Old-side line, absent for insertions.
    pub old_line: Option<String>,
    /// New-side line, absent for deletions.
    pub new_line: Option<String>,
}

/// Kind of a character-level diff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharDiffKind {
    /// Character identical on both sides.
    Equal,
    /// Character present only on the new side.
    Insert,
    /// Character present only on the old side.
    Delete,
}

/// One entry of a character-level diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharDiffEntry {
    /// How the two sides relate at this position.
    pub kind: CharDiffKind,
    /// The character in question.
    pub value: char,
}

/// A candidate location for a search block that failed to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// 1-indexed first physical line of the candidate window.
    pub start_line: usize,
    /// 1-indexed last physical line of the candidate window (inclusive).
    pub end_line: usize,
    /// Character-overlap similarity to the search block, 0-100.
    pub similarity: u32,
    /// The candidate's verbatim file lines.
    pub lines: Vec<String>,
}

/// Advisory repair information for a failed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairHint {
    /// 1-indexed lines of the candidate that differ from the search block.
    pub differing_lines: Vec<usize>,
    /// True when every difference is whitespace-only.
    pub whitespace_only: bool,
    /// Corrected search block: the candidate's verbatim file text.
    pub suggested_search: String,
}

/// Per-invocation configuration.
///
/// An explicit context object; the engine keeps no process-wide state.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// Ceiling on combined input size (file + search + replace) in bytes.
    pub max_input_bytes: usize,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 4 * 1024 * 1024,
        }
    }
}
