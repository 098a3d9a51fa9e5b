//! Multi-line literal masking.
//!
//! Indentation realignment must never rewrite the inside of a multi-line
//! string. Before realignment, every literal that spans more than one line
//! is collapsed into a single-line placeholder; afterwards the placeholder
//! is swapped back for the original text, byte for byte. Single-line
//! literals pass through untouched.
//!
//! Recognized spans: triple-quoted strings (`"""…"""`, `'''…'''`) and
//! back-tick templates, including `${…}` interpolation with nested
//! back-ticks and escape sequences.

/// Sentinel delimiters for placeholders.
///
/// Private-use-area characters cannot collide with real source text.
const MASK_OPEN: char = '\u{E000}';
const MASK_CLOSE: char = '\u{E001}';

/// Placeholder→original-literal mapping for one patch call.
///
/// Never persisted; a table only makes sense against the exact text it was
/// produced from.
#[derive(Debug, Default, Clone)]
pub struct LiteralTable {
    entries: Vec<(String, String)>,
}

impl LiteralTable {
    /// Number of masked literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was masked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, original: String) -> String {
        let placeholder = format!("{MASK_OPEN}{}{MASK_CLOSE}", self.entries.len());
        self.entries.push((placeholder.clone(), original));
        placeholder
    }
}

/// End index (exclusive) of a triple-quoted literal opening at `start`.
///
/// `quote` is the quote character; `start` points at the first of the three
/// opening quotes. Returns `None` when the literal never closes.
fn scan_triple(chars: &[char], start: usize, quote: char) -> Option<usize> {
    let mut i = start + 3;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == quote && chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote)
        {
            return Some(i + 3);
        }
        i += 1;
    }
    None
}

/// End index (exclusive) of a back-tick template opening at `start`.
///
/// Tracks `${…}` interpolation depth, counting plain `{`/`}` pairs inside
/// the expression so object literals do not close the interpolation early;
/// nested templates inside an expression are scanned recursively. Returns
/// `None` when the template never closes.
fn scan_template(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut depth = 0usize;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '$' if chars.get(i + 1) == Some(&'{') => {
                depth += 1;
                i += 2;
            }
            '{' if depth > 0 => {
                depth += 1;
                i += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                i += 1;
            }
            '`' if depth > 0 => {
                // Nested template inside an interpolation expression.
                i = scan_template(chars, i)?;
            }
            '`' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Mask every multi-line literal in `text` behind a single-line placeholder.
///
/// Returns the masked text and the table needed to undo it. Unterminated
/// literals are left as plain text.
#[must_use]
pub fn mask(text: &str) -> (String, LiteralTable) {
    let chars: Vec<char> = text.chars().collect();
    let mut table = LiteralTable::default();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let end = match chars[i] {
            q @ ('"' | '\'')
                if chars.get(i + 1) == Some(&q) && chars.get(i + 2) == Some(&q) =>
            {
                scan_triple(&chars, i, q)
            }
            '`' => scan_template(&chars, i),
            _ => None,
        };

        match end {
            Some(end) => {
                let literal: String = chars[i..end].iter().collect();
                if literal.contains('\n') {
                    out.push_str(&table.insert(literal));
                } else {
                    out.push_str(&literal);
                }
                i = end;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    (out, table)
}

/// Swap every placeholder in `text` back for its original literal.
#[must_use]
pub fn restore(text: &str, table: &LiteralTable) -> String {
    let mut out = text.to_string();
    for (placeholder, original) in &table.entries {
        out = out.replace(placeholder, original);
    }
    out
}
