//! Tests for the diff engine - alignment and tie-break stability.

use patchloom::{CharDiffKind, LineDiffKind, char_diff, generate_unified_diff, line_diff};

#[test]
fn test_equal_sequences_diff_to_equal_entries() {
    let lines = ["a", "b", "c"];
    let entries = line_diff(&lines, &lines);
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.kind == LineDiffKind::Equal));
}

#[test]
fn test_substitution_beats_delete_insert_pair() {
    let entries = line_diff(&["keep", "old", "keep"], &["keep", "new", "keep"]);
    let kinds: Vec<LineDiffKind> = entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![LineDiffKind::Equal, LineDiffKind::Modify, LineDiffKind::Equal]
    );
}

#[test]
fn test_block_insertion() {
    let entries = line_diff(&["a", "d"], &["a", "b", "c", "d"]);
    let inserted: Vec<&str> = entries
        .iter()
        .filter(|e| e.kind == LineDiffKind::Insert)
        .filter_map(|e| e.new_line.as_deref())
        .collect();
    assert_eq!(inserted, vec!["b", "c"]);
}

#[test]
fn test_deterministic_across_calls() {
    let old = ["x", "y", "z", "y"];
    let new = ["y", "z", "x"];
    let first = line_diff(&old, &new);
    let second = line_diff(&old, &new);
    assert_eq!(first, second);
}

#[test]
fn test_char_diff_reconstructs_both_sides() {
    let entries = char_diff("indentation", "intention");
    let old: String = entries
        .iter()
        .filter(|e| e.kind != CharDiffKind::Insert)
        .map(|e| e.value)
        .collect();
    let new: String = entries
        .iter()
        .filter(|e| e.kind != CharDiffKind::Delete)
        .map(|e| e.value)
        .collect();
    assert_eq!(old, "indentation");
    assert_eq!(new, "intention");
}

#[test]
fn test_char_diff_minimal_for_single_edit() {
    let entries = char_diff("abc", "adc");
    let changed = entries
        .iter()
        .filter(|e| e.kind != CharDiffKind::Equal)
        .count();
    // One delete plus one insert.
    assert_eq!(changed, 2);
}

#[test]
fn test_unified_diff_groups_context() {
    let old = "1\n2\n3\n4\n5\n6\n7\n8\n9\n";
    let new = "1\n2\n3\n4\nfive\n6\n7\n8\n9\n";
    let rendered = generate_unified_diff(old, new);
    assert!(rendered.contains("-5"));
    assert!(rendered.contains("+five"));
    // Far-away lines are outside the context window.
    assert!(!rendered.contains(" 1\n"));
}
