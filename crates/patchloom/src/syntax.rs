//! Comment/string-aware structural validation.
//!
//! Works in two phases. Phase 1 strips line comments, block comments,
//! string/regex literals, and template-literal bodies, while preserving
//! every line break so positions stay accurate; stripped characters become
//! spaces. Single quotes are language-dependent: where `'` delimits a char
//! literal (Rust, the C family, Go, the JVM languages) only
//! char-literal-shaped spans are consumed, so lifetimes and apostrophes
//! pass through. Phase 2 verifies bracket/paren/brace nesting on the
//! remaining skeleton and reports the first imbalance with a 1-based line
//! and column.
//!
//! This is a heuristic lexer, not a grammar. Its one genuinely ambiguous
//! decision, `/` as division vs. regex start, is isolated in
//! [`regex_can_follow`] so a real tokenizer can replace it later without
//! touching the rest of the validator.
//!
//! Validation failure is advisory: callers may still force-apply a patch,
//! but they must see the message.

use crate::language;

/// Result of a structural validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxCheck {
    /// No structural problem detected.
    Valid,
    /// Structure is broken; the patch may still be force-applied.
    Invalid {
        /// Description with a 1-based line/column position.
        message: String,
    },
}

/// Keywords after which a `/` starts a regex literal rather than division.
const REGEX_PRECEDING_KEYWORDS: [&str; 13] = [
    "return",
    "typeof",
    "case",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "instanceof",
    "do",
    "else",
    "yield",
    "throw",
];

/// Decide whether a `/` at the current position can start a regex literal.
///
/// A regex can follow an operator, an opening bracket, a statement
/// boundary, or one of a small set of keywords; after an identifier, a
/// number, or a closing bracket the `/` is division.
fn regex_can_follow(last_char: Option<char>, last_word: &str) -> bool {
    match last_char {
        None => true,
        Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {
            REGEX_PRECEDING_KEYWORDS.contains(&last_word)
        }
        Some(')' | ']') => false,
        Some(_) => true,
    }
}

/// End index (exclusive) of a char-literal-shaped span opening at `start`,
/// or `None` when the quote is a lifetime or a lone apostrophe.
///
/// Accepts one character or one escape (`\n`, `\x7f`, `\u{…}`) between the
/// quotes, never spanning a line break.
fn scan_char_literal(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    match chars.get(j)? {
        '\\' => {
            j += 1;
            if chars.get(j) == Some(&'u') && chars.get(j + 1) == Some(&'{') {
                j += 2;
                while chars.get(j).is_some_and(|c| *c != '}') {
                    j += 1;
                }
                j += 1;
            } else if chars.get(j) == Some(&'x') {
                j += 3;
            } else {
                j += 1;
            }
        }
        '\'' => return None,
        _ => j += 1,
    }
    if chars.get(j) != Some(&'\'') || chars[start + 1..j].contains(&'\n') {
        return None;
    }
    Some(j + 1)
}

/// Template-literal bookkeeping for phase 1.
struct TemplateFrame {
    /// 1-based line where the template opened.
    start_line: usize,
    /// Brace depth inside the current `${…}` expression, `None` while in
    /// the literal body.
    interp_depth: Option<usize>,
}

/// Strip non-code text, preserving line breaks and column positions.
///
/// Returns the skeleton, or an error message for unterminated templates or
/// interpolation expressions.
#[allow(clippy::too_many_lines)]
fn strip_non_code(text: &str, char_quotes: bool) -> Result<String, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut line = 1usize;
    let mut last_char: Option<char> = None;
    // Most recent run of identifier characters; survives whitespace so
    // `return /x/` still sees the keyword.
    let mut word = String::new();
    let mut in_word = false;
    let mut templates: Vec<TemplateFrame> = Vec::new();
    let mut i = 0;

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    // Emit a stripped character: newlines survive, everything else blanks.
    fn blank(out: &mut String, c: char, line: &mut usize) {
        if c == '\n' {
            out.push('\n');
            *line += 1;
        } else {
            out.push(' ');
        }
    }

    while i < chars.len() {
        let c = chars[i];
        let in_template_body = templates
            .last()
            .is_some_and(|frame| frame.interp_depth.is_none());

        if in_template_body {
            match c {
                '\\' => {
                    blank(&mut out, c, &mut line);
                    if let Some(&next) = chars.get(i + 1) {
                        blank(&mut out, next, &mut line);
                        i += 1;
                    }
                }
                '$' if chars.get(i + 1) == Some(&'{') => {
                    if let Some(frame) = templates.last_mut() {
                        frame.interp_depth = Some(0);
                    }
                    out.push_str("  ");
                    i += 1;
                    last_char = None;
                    word.clear();
                    in_word = false;
                }
                '`' => {
                    templates.pop();
                    blank(&mut out, c, &mut line);
                }
                _ => blank(&mut out, c, &mut line),
            }
            i += 1;
            continue;
        }

        match c {
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                out.push_str("  ");
                i += 2;
                while i < chars.len() {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        out.push_str("  ");
                        i += 2;
                        break;
                    }
                    blank(&mut out, chars[i], &mut line);
                    i += 1;
                }
                last_char = None;
                continue;
            }
            '/' if regex_can_follow(last_char, &word) => {
                // Regex literal: scan to the unescaped closing slash,
                // ignoring slashes inside character classes. A newline
                // means this was not a regex after all; bail out of the
                // literal and let the line stand.
                out.push(' ');
                i += 1;
                let mut in_class = false;
                while i < chars.len() && chars[i] != '\n' {
                    match chars[i] {
                        '\\' => {
                            out.push(' ');
                            i += 1;
                            if i < chars.len() && chars[i] != '\n' {
                                out.push(' ');
                                i += 1;
                            }
                            continue;
                        }
                        '[' => in_class = true,
                        ']' => in_class = false,
                        '/' if !in_class => {
                            out.push(' ');
                            i += 1;
                            break;
                        }
                        _ => {}
                    }
                    out.push(' ');
                    i += 1;
                }
                last_char = Some('/');
                word.clear();
                in_word = false;
                continue;
            }
            '\'' if char_quotes => {
                match scan_char_literal(&chars, i) {
                    Some(end) => {
                        for _ in i..end {
                            out.push(' ');
                        }
                        i = end;
                        last_char = Some('\'');
                        word.clear();
                        in_word = false;
                        continue;
                    }
                    None => {
                        // Lifetime or apostrophe; not a literal.
                        out.push(c);
                        last_char = Some(c);
                        word.clear();
                        in_word = false;
                    }
                }
            }
            '"' | '\'' => {
                let quote = c;
                out.push(' ');
                i += 1;
                while i < chars.len() && chars[i] != '\n' {
                    if chars[i] == '\\' {
                        out.push(' ');
                        i += 1;
                        if i < chars.len() && chars[i] != '\n' {
                            out.push(' ');
                            i += 1;
                        }
                        continue;
                    }
                    if chars[i] == quote {
                        out.push(' ');
                        i += 1;
                        break;
                    }
                    out.push(' ');
                    i += 1;
                }
                last_char = Some(quote);
                word.clear();
                in_word = false;
                continue;
            }
            '`' => {
                templates.push(TemplateFrame {
                    start_line: line,
                    interp_depth: None,
                });
                out.push(' ');
                last_char = None;
                word.clear();
                in_word = false;
            }
            '{' => {
                if let Some(frame) = templates.last_mut() {
                    if let Some(depth) = frame.interp_depth.as_mut() {
                        *depth += 1;
                    }
                }
                out.push(c);
                last_char = Some(c);
                word.clear();
                in_word = false;
            }
            '}' => {
                let closes_interp = templates
                    .last()
                    .is_some_and(|frame| frame.interp_depth == Some(0));
                if closes_interp {
                    if let Some(frame) = templates.last_mut() {
                        frame.interp_depth = None;
                    }
                    out.push(' ');
                    last_char = None;
                } else {
                    if let Some(frame) = templates.last_mut() {
                        if let Some(depth) = frame.interp_depth.as_mut() {
                            *depth = depth.saturating_sub(1);
                        }
                    }
                    out.push(c);
                    last_char = Some(c);
                }
                word.clear();
                in_word = false;
            }
            '\n' => {
                out.push('\n');
                line += 1;
                in_word = false;
            }
            _ => {
                out.push(c);
                if c.is_whitespace() {
                    in_word = false;
                } else {
                    last_char = Some(c);
                    if is_word_char(c) {
                        if !in_word {
                            word.clear();
                        }
                        word.push(c);
                        in_word = true;
                    } else {
                        word.clear();
                        in_word = false;
                    }
                }
            }
        }
        i += 1;
    }

    if let Some(frame) = templates.last() {
        if frame.interp_depth.is_some() {
            return Err(format!(
                "Unterminated template interpolation in literal starting at line {}",
                frame.start_line
            ));
        }
        return Err(format!(
            "Unterminated template literal starting at line {}",
            frame.start_line
        ));
    }

    Ok(out)
}

/// Verify bracket/paren/brace nesting on a stripped skeleton.
fn check_brackets(skeleton: &str) -> SyntaxCheck {
    let mut stack: Vec<(char, usize, usize)> = Vec::new();
    let mut line = 1usize;
    let mut col = 0usize;

    for c in skeleton.chars() {
        if c == '\n' {
            line += 1;
            col = 0;
            continue;
        }
        col += 1;
        match c {
            '(' | '[' | '{' => stack.push((c, line, col)),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, ..)) if open == expected => {}
                    Some((open, open_line, open_col)) => {
                        return SyntaxCheck::Invalid {
                            message: format!(
                                "Mismatched '{c}' at line {line}, column {col}: expected to close '{open}' from line {open_line}, column {open_col}"
                            ),
                        };
                    }
                    None => {
                        return SyntaxCheck::Invalid {
                            message: format!(
                                "Unexpected '{c}' at line {line}, column {col}: no matching '{expected}'"
                            ),
                        };
                    }
                }
            }
            _ => {}
        }
    }

    if let Some((open, open_line, open_col)) = stack.first() {
        return SyntaxCheck::Invalid {
            message: format!("Unclosed '{open}' opened at line {open_line}, column {open_col}"),
        };
    }
    SyntaxCheck::Valid
}

/// Validate `patched_text` for the language selected by `path`.
///
/// Files outside the configured extension set are always `Valid`.
#[must_use]
pub fn check(patched_text: &str, path: &str) -> SyntaxCheck {
    let rules = language::rules_for(path);
    if !rules.syntax_check {
        return SyntaxCheck::Valid;
    }
    match strip_non_code(patched_text, rules.char_quotes) {
        Ok(skeleton) => check_brackets(&skeleton),
        Err(message) => SyntaxCheck::Invalid { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_code_passes() {
        let code = "function f(a) {\n  return [a, { b: 1 }];\n}\n";
        assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_unclosed_brace_reports_position() {
        let code = "function f() {\n  if (x) {\n}\n";
        match check(code, "a.js") {
            SyntaxCheck::Invalid { message } => {
                assert!(message.contains("line 1"), "got: {message}");
            }
            SyntaxCheck::Valid => panic!("expected invalid"),
        }
    }

    #[test]
    fn test_brackets_in_strings_ignored() {
        let code = "const s = \"{[(\";\nconst t = '}}';\n";
        assert_eq!(check(code, "a.ts"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_brackets_in_comments_ignored() {
        let code = "// {{{\n/* ]]] (((\n*/\nlet x = 1;\n";
        assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_regex_literal_not_division() {
        // The `(` inside the regex must not open a bracket scope.
        let code = "const re = /foo(/;\nconst half = a / b;\n";
        assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_division_not_regex() {
        // If `a / b` were lexed as a regex start, the trailing `)` would
        // be swallowed and the parens would look unbalanced.
        let code = "const x = (a / b);\n";
        assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_template_interpolation_checked() {
        let code = "const t = `v=${f(x)}`;\n";
        assert_eq!(check(code, "a.ts"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_unterminated_template_reported() {
        let code = "const t = `open\nmore\n";
        match check(code, "a.js") {
            SyntaxCheck::Invalid { message } => {
                assert!(message.contains("template literal"), "got: {message}");
                assert!(message.contains("line 1"), "got: {message}");
            }
            SyntaxCheck::Valid => panic!("expected invalid"),
        }
    }

    #[test]
    fn test_rust_lifetimes_pass_through() {
        let code = "fn first<'a>(s: &'a str) -> &'a str {\n    &s[..1]\n}\n";
        assert_eq!(check(code, "lib.rs"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_char_literal_brackets_ignored() {
        let code = "let open = '(';\nlet esc = '\\n';\nlet uni = '\\u{1F600}';\nlet ok = (1);\n";
        assert_eq!(check(code, "main.rs"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_js_single_quote_still_a_string() {
        let code = "const s = '(((';\nconst t = (1);\n";
        assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_non_configured_language_skipped() {
        assert_eq!(check("((((", "notes.txt"), SyntaxCheck::Valid);
        assert_eq!(check("((((", "script.py"), SyntaxCheck::Valid);
    }

    #[test]
    fn test_regex_decision_function() {
        assert!(regex_can_follow(Some('='), ""));
        assert!(regex_can_follow(Some('('), ""));
        assert!(regex_can_follow(None, ""));
        assert!(regex_can_follow(Some('n'), "return"));
        assert!(!regex_can_follow(Some('b'), "b"));
        assert!(!regex_can_follow(Some(')'), ""));
        assert!(!regex_can_follow(Some('2'), "2"));
    }
}
