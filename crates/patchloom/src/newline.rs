//! Line-ending detection, normalization, and restoration.
//!
//! The engine works on LF internally; output restores the *file's* original
//! convention, independent of whatever convention the search/replace blocks
//! arrived in.

use serde::Serialize;

/// Line-ending convention of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineEnding {
    /// Unix `\n`.
    Lf,
    /// Windows `\r\n`.
    Crlf,
}

impl LineEnding {
    /// The literal separator for this convention.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Detect the line-ending convention of `text`.
///
/// Returns `None` when the text contains no line breaks at all. A text is
/// classified as CRLF when at least one `\r\n` appears and bare `\n`s do not
/// outnumber it; mixed files follow their majority convention.
#[must_use]
pub fn detect(text: &str) -> Option<LineEnding> {
    let total_lf = text.matches('\n').count();
    if total_lf == 0 {
        return None;
    }
    let crlf = text.matches("\r\n").count();
    let bare_lf = total_lf - crlf;
    if crlf > 0 && crlf >= bare_lf {
        Some(LineEnding::Crlf)
    } else {
        Some(LineEnding::Lf)
    }
}

/// Normalize all line endings to LF.
#[must_use]
pub fn normalize(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text.to_string()
    }
}

/// Re-emit LF-normalized `text` in the given convention.
#[must_use]
pub fn restore(text: &str, ending: LineEnding) -> String {
    match ending {
        LineEnding::Lf => text.to_string(),
        LineEnding::Crlf => text.replace('\n', "\r\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_lf() {
        assert_eq!(detect("a\nb\n"), Some(LineEnding::Lf));
    }

    #[test]
    fn test_detect_crlf() {
        assert_eq!(detect("a\r\nb\r\n"), Some(LineEnding::Crlf));
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect("single line"), None);
    }

    #[test]
    fn test_mixed_majority_wins() {
        assert_eq!(detect("a\r\nb\r\nc\n"), Some(LineEnding::Crlf));
        assert_eq!(detect("a\nb\nc\r\n"), Some(LineEnding::Lf));
    }

    #[test]
    fn test_round_trip() {
        let original = "a\r\nb\r\n";
        let normalized = normalize(original);
        assert_eq!(normalized, "a\nb\n");
        assert_eq!(restore(&normalized, LineEnding::Crlf), original);
    }
}
