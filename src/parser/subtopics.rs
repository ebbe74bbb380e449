use std::sync::LazyLock;

use regex::Regex;

use super::lines::{
    is_alt_keyword_header, is_blank_or_divider, is_edge_header, is_keyword_header, is_label_value,
    is_next_numbered_section, strip_leading_glyph, strip_markers, unwrap_double_quotes,
    BULLET_GLYPHS,
};
use super::SectionScan;

// Section 4 and above means the keyword section is over
static SECTION_4_PLUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[4-9]|\d{2,})\.\s+[A-Z]").unwrap());
// Subsection titles like "A. Category One"; the content line below them is
// what gets captured
static LETTERED_SUBSECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-F]\.\s+\S").unwrap());

const NOISE_PREFIXES: &[&str] = &[
    "high-signal",
    "keywords",
    "phrases",
    "these are",
    "use these",
    "purpose:",
    "tip:",
    "note:",
    "clarifying",
];
const INFO_GLYPHS: &[char] = &['ℹ', '💡', '📌', '🔍', '👉'];

const KEYWORDS_PREFIX: &str = "Keywords:";

/// Sub-topic/category lines in document order. Duplicates are left in; the
/// aggregation layer dedups.
pub fn extract_sub_topics(src: &str) -> Vec<String> {
    let primary = scan_keyword_section(src);
    if !primary.is_empty() {
        return primary;
    }
    scan_label_lines(src)
}

fn scan_keyword_section(src: &str) -> Vec<String> {
    let mut topics = Vec::new();
    let mut state = SectionScan::Outside;

    for line in src.lines() {
        match state {
            SectionScan::Outside => {
                if is_keyword_header(line) {
                    state = SectionScan::Inside;
                }
            }
            SectionScan::Inside => {
                if ends_keyword_section(line) {
                    state = SectionScan::Done;
                } else if let Some(topic) = section_item(line) {
                    topics.push(topic);
                }
            }
            SectionScan::Done => break,
        }
    }

    topics
}

fn ends_keyword_section(line: &str) -> bool {
    SECTION_4_PLUS_RE.is_match(line) || line.to_lowercase().contains("labeling examples")
}

fn section_item(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if is_noise_line(trimmed) || LETTERED_SUBSECTION_RE.is_match(trimmed) {
        return None;
    }

    // Bullets and numbering go; quotes stay (fallback-only unwrapping)
    let item = strip_markers(trimmed);
    if is_blank_or_divider(&item) {
        return None;
    }

    if let Some(rest) = item.strip_prefix(KEYWORDS_PREFIX) {
        let rest = rest.trim();
        if rest.is_empty() {
            return None;
        }
        return Some(format!("{} {}", KEYWORDS_PREFIX, rest));
    }

    // Older doc format: direct "Category: value" lines inside the section
    let lower = item.to_lowercase();
    if item.chars().count() > 2 && item.contains(':') && !lower.starts_with("purpose:") {
        return Some(item);
    }
    None
}

fn is_noise_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    // A `Keywords:` item line wins over the bare "keywords" noise prefix
    if lower.starts_with("keywords:") {
        return false;
    }
    NOISE_PREFIXES.iter().any(|p| lower.starts_with(p))
        || line.chars().next().is_some_and(|c| INFO_GLYPHS.contains(&c))
}

/// Document-wide fallback: any label:value line outside the known headers.
fn scan_label_lines(src: &str) -> Vec<String> {
    let mut topics = Vec::new();

    for line in src.lines() {
        let t = strip_leading_glyph(line.trim(), BULLET_GLYPHS);
        if is_keyword_header(t)
            || is_alt_keyword_header(t)
            || is_edge_header(t)
            || is_next_numbered_section(t)
        {
            continue;
        }
        if !is_label_value(t) {
            continue;
        }
        match unwrap_double_quotes(t) {
            Some(inner) => topics.push(inner.to_string()),
            None => topics.push(t.to_string()),
        }
    }

    topics
}

// ── Tests ──
