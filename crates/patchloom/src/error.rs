//! Error types for the patch engine.
//!
//! Library crates use `thiserror` for explicit error enums.
//!
//! Patch-level results (not found, ambiguous, already applied, syntax
//! failure) are *values* carried by [`crate::PatchOutcome`], never errors.
//! `PatchError` is reserved for misuse of the engine itself.

use thiserror::Error;

/// Error types for patch-engine invocation.
///
/// Each variant represents a precondition violation, not a patch result.
#[derive(Error, Debug)]
pub enum PatchError {
    /// Combined input (file + search + replace) exceeds the configured ceiling.
    #[error("Input too large: {0} bytes (limit: {1})")]
    InputTooLarge(usize, usize),

    /// The search block contains no logical lines after normalization.
    #[error("Search block is empty after whitespace normalization")]
    EmptySearch,
}
