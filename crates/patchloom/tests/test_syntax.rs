//! Tests for the structural validator - stripping and bracket checking.

use patchloom::SyntaxCheck;
use patchloom::syntax::check;

fn expect_invalid(code: &str, path: &str) -> String {
    match check(code, path) {
        SyntaxCheck::Invalid { message } => message,
        SyntaxCheck::Valid => panic!("expected invalid: {code:?}"),
    }
}

#[test]
fn test_well_formed_module_passes() {
    let code = r#"
import { api } from "./api";

export function load(id) {
    // fetch [cached] data
    const url = `/items/${id}`;
    return api.get(url).then((r) => r.json());
}
"#;
    assert_eq!(check(code, "load.js"), SyntaxCheck::Valid);
}

#[test]
fn test_unexpected_closer_position() {
    let message = expect_invalid("let a = 1;\nlet b = x);\n", "a.js");
    assert!(message.contains("line 2"), "got: {message}");
    assert!(message.contains("')'"), "got: {message}");
}

#[test]
fn test_mismatched_pair_reports_both_sides() {
    let message = expect_invalid("const x = [1, 2};\n", "a.ts");
    assert!(message.contains("'}'"), "got: {message}");
    assert!(message.contains("'['"), "got: {message}");
    assert!(message.contains("line 1"), "got: {message}");
}

#[test]
fn test_unclosed_opener_reports_origin() {
    let message = expect_invalid("fn main() {\n    call(\n}\n", "a.rs");
    assert!(message.contains("line 2"), "got: {message}");
}

#[test]
fn test_string_contents_never_counted() {
    let code = "const a = \"(((\";\nconst b = ')';\n";
    assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
}

#[test]
fn test_comment_contents_never_counted() {
    let code = "/* } */\n// )\nlet ok = (1 + [2]);\n";
    assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
}

#[test]
fn test_regex_with_brackets_is_opaque() {
    let code = "const re = /^[)(]+\\/foo/; const q = (1);\n";
    assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
}

#[test]
fn test_division_is_not_regex_start() {
    let code = "const r = (total) / (count);\n";
    assert_eq!(check(code, "a.js"), SyntaxCheck::Valid);
}

#[test]
fn test_unterminated_interpolation_reported() {
    let message = expect_invalid("const t = `v=${func(\n", "a.ts");
    assert!(message.contains("interpolation"), "got: {message}");
}

#[test]
fn test_rust_lifetime_annotations_are_not_strings() {
    let code = "impl<'a> Iterator for Splitter<'a> {\n    type Item = &'a str;\n}\n";
    assert_eq!(check(code, "split.rs"), SyntaxCheck::Valid);
}

#[test]
fn test_char_literals_opaque_to_bracket_counting() {
    let code = "if c == '(' || c == '{' {\n    depth += 1;\n}\n";
    assert_eq!(check(code, "lexer.rs"), SyntaxCheck::Valid);
}

#[test]
fn test_non_brace_languages_always_pass() {
    assert_eq!(check("(((", "script.py"), SyntaxCheck::Valid);
    assert_eq!(check("}}}", "README.md"), SyntaxCheck::Valid);
}
