use std::sync::LazyLock;

use regex::Regex;

static KEYWORD_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\d*\.?\s*(?:keyword reference\b|keywords\s*$)").unwrap());
static ALT_KEYWORD_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\d*\.?\s*high-signal keywords\b").unwrap());
static EDGE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\d*\.?\s*(?:edge case guidance|edge cases)\b").unwrap());
static NEXT_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+[A-Z]").unwrap());
static NUMERIC_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());
static LABEL_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^:]+:\s+.+$").unwrap());

pub const BULLET_GLYPHS: &[char] = &['•', '*', '-', '–', '—'];

const DIVIDER_GLYPHS: &[char] = &['-', '=', '_'];

// (open, close) pairs; straight quotes close with themselves
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];
const DOUBLE_QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('“', '”')];

/// Canonical item form of a raw line: trimmed, one leading bullet glyph and
/// one numeric marker (`1.` / `1)`) removed, one matching surrounding quote
/// pair removed.
pub fn clean(line: &str) -> String {
    let stripped = strip_markers(line);
    match unwrap_pair(&stripped, QUOTE_PAIRS) {
        Some(inner) => inner.trim().to_string(),
        None => stripped,
    }
}

/// Bullet + numbering removal only. The section-scan paths use this instead
/// of `clean`: surrounding quotes survive there and are unwrapped only by
/// the document-wide fallbacks.
pub fn strip_markers(line: &str) -> String {
    let no_bullet = strip_leading_glyph(line.trim(), BULLET_GLYPHS);
    NUMERIC_MARKER_RE.replace(no_bullet, "").trim().to_string()
}

/// True for empty-after-trim lines and visual separator lines: a run of 3+
/// divider glyphs or one standalone glyph. Two glyphs is content.
pub fn is_blank_or_divider(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() {
        return true;
    }
    let n = t.chars().count();
    (n == 1 || n >= 3) && t.chars().all(|c| DIVIDER_GLYPHS.contains(&c))
}

pub fn is_keyword_header(line: &str) -> bool {
    KEYWORD_HEADER_RE.is_match(line)
}

pub fn is_alt_keyword_header(line: &str) -> bool {
    ALT_KEYWORD_HEADER_RE.is_match(line)
}

pub fn is_edge_header(line: &str) -> bool {
    EDGE_HEADER_RE.is_match(line)
}

/// `<digits>. <Capitalized...>` at line start, i.e. a new top-level section.
pub fn is_next_numbered_section(line: &str) -> bool {
    NEXT_SECTION_RE.is_match(line)
}

/// `<non-colon run>: <text>`, the generic category/value line shape.
pub fn is_label_value(line: &str) -> bool {
    LABEL_VALUE_RE.is_match(line)
}

/// Interior of a line wrapped in matching double quotes (straight or curly).
pub fn unwrap_double_quotes(line: &str) -> Option<&str> {
    unwrap_pair(line, DOUBLE_QUOTE_PAIRS)
}

pub(crate) fn strip_leading_glyph<'a>(s: &'a str, glyphs: &[char]) -> &'a str {
    match s.chars().next() {
        Some(c) if glyphs.contains(&c) => s[c.len_utf8()..].trim_start(),
        _ => s,
    }
}

fn unwrap_pair<'a>(s: &'a str, pairs: &[(char, char)]) -> Option<&'a str> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    pairs
        .iter()
        .find(|(open, close)| *open == first && *close == last)
        .map(|_| &s[first.len_utf8()..s.len() - last.len_utf8()])
}

// ── Tests ──
