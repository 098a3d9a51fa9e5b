//! Extension-based language classification.
//!
//! A static, exhaustive table decides which checks apply to a file:
//! indentation-significant languages get strict-indent matching, and
//! brace-delimited languages get the post-splice syntax validation. The
//! table is data, not string dispatch, so the decisions stay testable.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

/// Per-language matching and validation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageRules {
    /// Matching requires proportional indentation deltas.
    pub strict_indent: bool,
    /// The patched result is checked for bracket/string structure.
    pub syntax_check: bool,
    /// `'` delimits a single character (or a Rust lifetime), not a string.
    pub char_quotes: bool,
}

const STRICT_INDENT: LanguageRules = LanguageRules {
    strict_indent: true,
    syntax_check: false,
    char_quotes: false,
};

const SYNTAX_CHECK: LanguageRules = LanguageRules {
    strict_indent: false,
    syntax_check: true,
    char_quotes: false,
};

const SYNTAX_CHECK_CHAR_QUOTES: LanguageRules = LanguageRules {
    strict_indent: false,
    syntax_check: true,
    char_quotes: true,
};

static RULES: Lazy<HashMap<&'static str, LanguageRules>> = Lazy::new(|| {
    let mut map = HashMap::new();
    // Indentation-significant languages.
    for ext in ["py", "pyi", "yaml", "yml"] {
        map.insert(ext, STRICT_INDENT);
    }
    // Brace-delimited languages with single-quoted strings.
    for ext in ["js", "jsx", "mjs", "cjs", "ts", "tsx", "json", "css", "scss"] {
        map.insert(ext, SYNTAX_CHECK);
    }
    // Brace-delimited languages where `'` is a char literal, not a string.
    for ext in [
        "java", "c", "h", "cpp", "cc", "hpp", "cs", "go", "rs", "swift", "kt", "scala",
    ] {
        map.insert(ext, SYNTAX_CHECK_CHAR_QUOTES);
    }
    map
});

/// Rules for a file path; unknown extensions get neither check.
#[must_use]
pub fn rules_for(path: &str) -> LanguageRules {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .and_then(|ext| RULES.get(ext.as_str()).copied())
        .unwrap_or_default()
}
