use std::sync::LazyLock;

use regex::Regex;

use super::lines::{
    is_blank_or_divider, is_edge_header, is_keyword_header, is_label_value, strip_leading_glyph,
    unwrap_double_quotes, BULLET_GLYPHS,
};
use super::SectionScan;

// Sections 6 and 7 are the known followers of the edge-case section
static SECTION_6_OR_7_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[67]\.\s+[A-Z]").unwrap());
static NUMERIC_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

// Bullets plus the status glyphs authors decorate guidance lines with
const INDICATOR_GLYPHS: &[char] = &['•', '*', '-', '–', '—', '✓', '✔', '✅', '⚠', '❌'];

// Section-6 titles that show up without a numeric prefix
const TERMINATOR_PHRASES: &[&str] = &["common pitfalls", "escalation protocol"];

/// Edge-case guidance items in document order. Items keep their sentence
/// punctuation and surrounding quotes; only the fallback path unwraps quotes.
pub fn extract_edge_cases(src: &str) -> Vec<String> {
    let primary = scan_edge_section(src);
    if !primary.is_empty() {
        return primary;
    }
    scan_quoted_or_bulleted(src)
}

fn scan_edge_section(src: &str) -> Vec<String> {
    let mut cases = Vec::new();
    let mut state = SectionScan::Outside;

    for line in src.lines() {
        match state {
            SectionScan::Outside => {
                if is_edge_header(line) {
                    state = SectionScan::Inside;
                }
            }
            SectionScan::Inside => {
                if ends_edge_section(line) {
                    state = SectionScan::Done;
                } else if let Some(item) = section_item(line) {
                    cases.push(item);
                }
            }
            SectionScan::Done => break,
        }
    }

    cases
}

fn ends_edge_section(line: &str) -> bool {
    if SECTION_6_OR_7_RE.is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    TERMINATOR_PHRASES.iter().any(|p| lower.contains(p))
}

fn section_item(line: &str) -> Option<String> {
    let stripped = strip_leading_glyph(line.trim(), INDICATOR_GLYPHS);
    let item = NUMERIC_MARKER_RE.replace(stripped, "").trim().to_string();
    if is_blank_or_divider(&item) || item.chars().count() <= 2 {
        return None;
    }
    Some(item)
}

/// Document-wide fallback: quoted lines (unwrapped) and bulleted lines.
fn scan_quoted_or_bulleted(src: &str) -> Vec<String> {
    let mut cases = Vec::new();

    for line in src.lines() {
        let t = line.trim();
        if is_keyword_header(t) || is_edge_header(t) || is_label_value(t) {
            continue;
        }
        if let Some(inner) = unwrap_double_quotes(t) {
            cases.push(inner.to_string());
            continue;
        }
        if let Some(first) = t.chars().next() {
            if BULLET_GLYPHS.contains(&first) {
                let rest = t[first.len_utf8()..].strip_prefix(' ').unwrap_or(&t[first.len_utf8()..]);
                if !rest.is_empty() {
                    cases.push(rest.to_string());
                }
            }
        }
    }

    cases
}

// ── Tests ──
