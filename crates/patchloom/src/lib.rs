//! patchloom - Whitespace-Tolerant SEARCH/REPLACE Patch Engine
//!
//! Applies AI-proposed SEARCH/REPLACE edits to real source text. The engine
//! locates the intended edit despite whitespace, indentation, and
//! line-ending drift, re-derives correct indentation for the inserted
//! block, and validates that the result does not break bracket/string
//! structure — all without a full language parser, and never guessing
//! among ambiguous matches.
//!
//! # Features
//!
//! - **Logical matching**: whitespace-normalized, blank-line-free signature
//!   comparison, with a strict proportional-indent mode for Python/YAML
//! - **Indent realignment**: replacement blocks are re-leveled onto the
//!   target file's indentation convention
//! - **Literal safety**: multi-line strings and templates are masked during
//!   realignment and restored byte-for-byte
//! - **Structural validation**: comment/string-aware bracket checking with
//!   1-based positions, advisory on failure
//! - **Diagnostics**: candidate locations and repair hints when a search
//!   block matches nothing
//!
//! # Architecture
//!
//! ```text
//! patchloom/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # PatchError enum (thiserror)
//! ├── types.rs        # PatchOutcome, diff entries, candidates
//! ├── newline.rs      # CRLF/LF detection and restoration
//! ├── signature.rs    # Logical signature builder
//! ├── matcher.rs      # Exact/strict matcher + fuzzy fallback
//! ├── indent.rs       # Indentation realigner
//! ├── literal.rs      # Multi-line literal masker
//! ├── syntax.rs       # Bracket/string structural validator
//! ├── language.rs     # Extension → language-rule table
//! ├── patcher.rs      # Orchestrator state machine
//! ├── diff.rs         # Line/char minimum-edit-distance engine
//! └── diagnostics.rs  # Candidate finder + repair hints
//! ```
//!
//! # Example
//!
//! ```
//! use patchloom::{PatchOutcome, PatchRequest, Patcher};
//!
//! let file = "def greet():\n    return \"hi\"\n";
//! let request = PatchRequest {
//!     file_path: "greet.py",
//!     search_text: "    return \"hi\"",
//!     replace_text: "    return \"hello\"",
//! };
//! let outcome = Patcher::apply(file, &request)?;
//! assert!(matches!(outcome, PatchOutcome::Success { match_line: 2, .. }));
//! # Ok::<(), patchloom::PatchError>(())
//! ```

mod error;
mod types;

pub mod diagnostics;
pub mod diff;
pub mod indent;
pub mod language;
pub mod literal;
pub mod matcher;
pub mod newline;
pub mod patcher;
pub mod signature;
pub mod syntax;

pub use error::PatchError;
pub use types::{
    Candidate, CharDiffEntry, CharDiffKind, LineDiffEntry, LineDiffKind, LogicalLine, MatchResult,
    PatchConfig, PatchOutcome, PatchRequest, RepairHint,
};

pub use diagnostics::{DEFAULT_MIN_SIMILARITY, find_candidates, repair_hint};
pub use diff::{char_diff, generate_unified_diff, line_diff};
pub use literal::LiteralTable;
pub use newline::LineEnding;
pub use patcher::Patcher;
pub use syntax::SyntaxCheck;
