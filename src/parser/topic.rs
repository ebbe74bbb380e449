use std::sync::LazyLock;

use regex::Regex;

use super::lines::{
    is_blank_or_divider, is_edge_header, is_keyword_header, is_label_value,
    is_next_numbered_section, BULLET_GLYPHS,
};

/// Fixed title suffix that labeling docs carry, e.g.
/// "Widget Safety Labeling Instructions". Matched case-sensitively.
const MARKER_PHRASE: &str = "Labeling Instructions";

static TOPIC_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)topic:").unwrap());

const QUOTE_GLYPHS: &[char] = &['"', '\'', '“', '”', '‘', '’'];

type Strategy = fn(&[&str]) -> Option<String>;

// Priority order: explicit title marker, then an explicit Topic: field, then
// the first line that looks like a bare title. First success wins.
const STRATEGIES: &[Strategy] = &[from_marker_phrase, from_topic_label, from_first_plain_line];

/// Best single-line topic for the document, or empty string when no strategy
/// matches.
pub fn extract_main_topic(src: &str) -> String {
    let lines: Vec<&str> = src.lines().collect();
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&lines))
        .unwrap_or_default()
}

fn from_marker_phrase(lines: &[&str]) -> Option<String> {
    for line in lines {
        if line.contains(MARKER_PHRASE) {
            let rest = strip_marker_phrase(line);
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}

fn from_topic_label(lines: &[&str]) -> Option<String> {
    for line in lines {
        if let Some(m) = TOPIC_LABEL_RE.find(line) {
            let rest = strip_marker_phrase(&line[m.end()..]);
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}

fn from_first_plain_line(lines: &[&str]) -> Option<String> {
    for line in lines {
        let t = line.trim();
        if is_blank_or_divider(t) {
            continue;
        }
        if is_keyword_header(t) || is_edge_header(t) || is_next_numbered_section(t) {
            continue;
        }
        let lower = t.to_lowercase();
        if lower.starts_with("here") || lower.contains("breakdown") {
            continue;
        }
        // Item-shaped lines never serve as titles
        let first = t.chars().next().unwrap_or_default();
        if QUOTE_GLYPHS.contains(&first) || BULLET_GLYPHS.contains(&first) {
            continue;
        }
        if is_label_value(t) {
            continue;
        }
        return Some(strip_marker_phrase(t));
    }
    None
}

fn strip_marker_phrase(line: &str) -> String {
    line.replacen(MARKER_PHRASE, "", 1).trim().to_string()
}

// ── Tests ──
