//! Patch orchestration.
//!
//! Sequences the pipeline into one deterministic outcome:
//! already-applied check → match count → exact or fuzzy location →
//! literal masking → indentation realignment → splice → syntax check.
//! Identical inputs always produce identical outcomes; nothing survives
//! between calls.

use tracing::debug;

use crate::diff::generate_unified_diff;
use crate::error::PatchError;
use crate::indent;
use crate::language;
use crate::literal;
use crate::matcher;
use crate::newline::{self, LineEnding};
use crate::signature::{same_content, signature};
use crate::syntax::{self, SyntaxCheck};
use crate::types::{PatchConfig, PatchOutcome, PatchRequest};

/// SEARCH/REPLACE patch-application engine.
///
/// Pure and synchronous: the engine receives file content and returns the
/// patched content for the caller to persist. Different files may be
/// patched concurrently; calls against the *same* file must be serialized
/// by the caller, since each outcome is computed against one content
/// snapshot.
///
/// # Example
///
/// ```
/// use patchloom::{PatchOutcome, PatchRequest, Patcher};
///
/// let request = PatchRequest {
///     file_path: "demo.py",
///     search_text: "    return 1",
///     replace_text: "    return 2",
/// };
/// let outcome = Patcher::apply("def f():\n    return 1\n", &request)?;
/// match outcome {
///     PatchOutcome::Success { patched_content, .. } => {
///         assert_eq!(patched_content, "def f():\n    return 2\n");
///     }
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// # Ok::<(), patchloom::PatchError>(())
/// ```
pub struct Patcher;

impl Patcher {
    /// Apply one SEARCH/REPLACE request with the default configuration.
    ///
    /// # Errors
    /// Returns [`PatchError`] only for engine misuse (oversized input,
    /// empty search block). Every patch-level result, including failure to
    /// match, is a [`PatchOutcome`] variant.
    pub fn apply(file_content: &str, request: &PatchRequest) -> Result<PatchOutcome, PatchError> {
        Self::apply_with(file_content, request, &PatchConfig::default())
    }

    /// Apply one SEARCH/REPLACE request with an explicit configuration.
    ///
    /// # Errors
    /// See [`Patcher::apply`].
    pub fn apply_with(
        file_content: &str,
        request: &PatchRequest,
        config: &PatchConfig,
    ) -> Result<PatchOutcome, PatchError> {
        let total = file_content.len() + request.search_text.len() + request.replace_text.len();
        if total > config.max_input_bytes {
            return Err(PatchError::InputTooLarge(total, config.max_input_bytes));
        }

        let search_sig = signature(request.search_text);
        if search_sig.is_empty() {
            return Err(PatchError::EmptySearch);
        }
        let replace_sig = signature(request.replace_text);

        // A patch whose replacement equals its search block is a no-op;
        // the file already is the requested end state.
        if same_content(&search_sig, &replace_sig) {
            debug!(path = request.file_path, "search equals replace, no-op");
            return Ok(PatchOutcome::AlreadyApplied);
        }

        let ending = newline::detect(file_content).unwrap_or(LineEnding::Lf);
        let normalized = newline::normalize(file_content);
        let file_sig = signature(&normalized);
        let rules = language::rules_for(request.file_path);

        // Idempotence guard. Approximate: the replacement's normalized form
        // could in principle appear elsewhere in the file; the search-absent
        // condition narrows that window.
        if !replace_sig.is_empty()
            && matcher::count_matches(&file_sig, &replace_sig, false) > 0
            && matcher::count_matches(&file_sig, &search_sig, false) == 0
        {
            debug!(path = request.file_path, "patch already applied");
            return Ok(PatchOutcome::AlreadyApplied);
        }

        let file_lines: Vec<&str> = normalized.split('\n').collect();

        let span = match matcher::locate(&file_sig, &search_sig, rules.strict_indent) {
            Some(m) if m.match_count == 1 => (m.start_line, m.end_line),
            Some(m) => {
                debug!(
                    path = request.file_path,
                    count = m.match_count,
                    "ambiguous match"
                );
                return Ok(PatchOutcome::Ambiguous {
                    match_count: m.match_count,
                });
            }
            None => {
                let search_normalized = newline::normalize(request.search_text);
                let search_lines: Vec<&str> = search_normalized.split('\n').collect();
                let fuzzy = matcher::find_fuzzy_matches(&file_lines, &search_lines);
                match fuzzy.as_slice() {
                    [] => {
                        debug!(path = request.file_path, "no match, exact or fuzzy");
                        return Ok(PatchOutcome::NotFound);
                    }
                    [(start, len)] => {
                        debug!(path = request.file_path, start = *start, "fuzzy match accepted");
                        (*start, *start + *len - 1)
                    }
                    many => {
                        return Ok(PatchOutcome::Ambiguous {
                            match_count: many.len(),
                        });
                    }
                }
            }
        };

        let patched = splice(&file_lines, span, request);
        let patched_restored = newline::restore(&patched, ending);

        if let SyntaxCheck::Invalid { message } = syntax::check(&patched, request.file_path) {
            debug!(path = request.file_path, %message, "syntax check failed");
            return Ok(PatchOutcome::SyntaxError {
                message,
                patched_content_anyway: patched_restored,
            });
        }

        debug!(
            path = request.file_path,
            match_line = span.0 + 1,
            "patch applied"
        );
        Ok(PatchOutcome::Success {
            patched_content: patched_restored,
            match_line: span.0 + 1,
            line_count: span.1 - span.0 + 1,
        })
    }

    /// Render a unified diff preview of an applied outcome.
    ///
    /// Returns `None` for outcomes that carry no patched content.
    #[must_use]
    pub fn preview(original: &str, outcome: &PatchOutcome) -> Option<String> {
        match outcome {
            PatchOutcome::Success {
                patched_content, ..
            }
            | PatchOutcome::SyntaxError {
                patched_content_anyway: patched_content,
                ..
            } => Some(generate_unified_diff(original, patched_content)),
            _ => None,
        }
    }
}

/// Replace the matched physical span with the realigned replacement block.
///
/// Multi-line literals in the replacement are masked before realignment and
/// restored verbatim afterwards, so their bodies never get re-indented.
fn splice(file_lines: &[&str], span: (usize, usize), request: &PatchRequest) -> String {
    let (masked, table) = literal::mask(&newline::normalize(request.replace_text));
    let mut masked_lines: Vec<&str> = masked.split('\n').collect();
    // A trailing newline in the replacement block is an artifact of how the
    // block was extracted, not an extra blank line to insert.
    if masked_lines.last() == Some(&"") {
        masked_lines.pop();
    }

    let search_normalized = newline::normalize(request.search_text);
    let search_lines: Vec<&str> = search_normalized.split('\n').collect();

    let aligned = indent::align(file_lines, span.0, &search_lines, &masked_lines);
    let block = literal::restore(&aligned.join("\n"), &table);

    let mut out: Vec<&str> = Vec::with_capacity(file_lines.len());
    out.extend(&file_lines[..span.0]);
    if !block.is_empty() {
        out.extend(block.split('\n'));
    }
    out.extend(&file_lines[span.1 + 1..]);
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(path: &'a str, search: &'a str, replace: &'a str) -> PatchRequest<'a> {
        PatchRequest {
            file_path: path,
            search_text: search,
            replace_text: replace,
        }
    }

    #[test]
    fn test_input_ceiling_enforced() {
        let config = PatchConfig { max_input_bytes: 8 };
        let req = request("a.txt", "search", "replace");
        let result = Patcher::apply_with("content", &req, &config);
        assert!(matches!(result, Err(PatchError::InputTooLarge(_, 8))));
    }

    #[test]
    fn test_empty_search_rejected() {
        let req = request("a.txt", "   \n\n", "x");
        assert!(matches!(
            Patcher::apply("body\n", &req),
            Err(PatchError::EmptySearch)
        ));
    }

    #[test]
    fn test_deletion_patch() {
        let req = request("a.txt", "middle\n", "");
        let outcome = Patcher::apply("top\nmiddle\nbottom\n", &req).expect("engine ok");
        match outcome {
            PatchOutcome::Success {
                patched_content, ..
            } => assert_eq!(patched_content, "top\nbottom\n"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_preview_renders_diff() {
        let original = "a\nb\n";
        let req = request("a.txt", "b", "c");
        let outcome = Patcher::apply(original, &req).expect("engine ok");
        let diff = Patcher::preview(original, &outcome).expect("preview available");
        assert!(diff.contains("-b"));
        assert!(diff.contains("+c"));
        assert_eq!(Patcher::preview(original, &PatchOutcome::NotFound), None);
    }
}
