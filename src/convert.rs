use std::collections::HashSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::parser;

/// The normalized record a labeling document converts into. Field names and
/// order are the downstream sheet generator's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub main_topic: String,
    pub sub_topics: Vec<String>,
    pub edge_cases: Vec<String>,
}

impl Conversion {
    /// Run all three extractors over the document and assemble the record.
    /// Items are trimmed, empties dropped, duplicates removed keeping the
    /// first occurrence.
    pub fn from_document(src: &str) -> Self {
        Self {
            main_topic: parser::extract_main_topic(src).trim().to_string(),
            sub_topics: dedup_trimmed(parser::extract_sub_topics(src)),
            edge_cases: dedup_trimmed(parser::extract_edge_cases(src)),
        }
    }

    /// A record is submittable when it has a topic and at least one
    /// sub-topic. Edge cases may legitimately be empty.
    pub fn validate(&self) -> Result<()> {
        if self.main_topic.is_empty() {
            bail!("main_topic is required");
        }
        if self.sub_topics.is_empty() {
            bail!("sub_topics is required");
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn dedup_trimmed(items: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let items = vec![
            "  b  ".to_string(),
            "a".to_string(),
            "b".to_string(),
            "".to_string(),
            "a ".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedup_trimmed(items), vec!["b", "a", "c"]);
    }

    #[test]
    fn record_from_document() {
        let doc = "Widget Safety Labeling Instructions\n\
                   3. Keyword Reference\n\
                   Keywords: spark, flame\n\
                   Keywords: spark, flame\n\
                   4. Labeling Examples\n\
                   5. Edge Cases\n\
                   - Escalate anything ambiguous.\n\
                   6. Common Pitfalls";
        let conversion = Conversion::from_document(doc);
        assert_eq!(conversion.main_topic, "Widget Safety");
        assert_eq!(conversion.sub_topics, vec!["Keywords: spark, flame"]);
        assert_eq!(conversion.edge_cases, vec!["Escalate anything ambiguous."]);
        assert!(conversion.is_valid());
    }

    #[test]
    fn validation_reasons() {
        let missing_topic = Conversion {
            main_topic: String::new(),
            sub_topics: vec!["Severity: low".to_string()],
            edge_cases: vec![],
        };
        let err = missing_topic.validate().unwrap_err();
        assert!(err.to_string().contains("main_topic"));

        let missing_subs = Conversion {
            main_topic: "Widget Safety".to_string(),
            sub_topics: vec![],
            edge_cases: vec![],
        };
        let err = missing_subs.validate().unwrap_err();
        assert!(err.to_string().contains("sub_topics"));
    }

    #[test]
    fn empty_edge_cases_are_valid() {
        let conversion = Conversion {
            main_topic: "Widget Safety".to_string(),
            sub_topics: vec!["Severity: low".to_string()],
            edge_cases: vec![],
        };
        assert!(conversion.is_valid());
    }

    #[test]
    fn empty_document_is_invalid_not_an_error() {
        let conversion = Conversion::from_document("");
        assert!(!conversion.is_valid());
        assert!(conversion.main_topic.is_empty());
        assert!(conversion.sub_topics.is_empty());
        assert!(conversion.edge_cases.is_empty());
    }

    #[test]
    fn json_field_names() {
        let conversion = Conversion {
            main_topic: "Widget Safety".to_string(),
            sub_topics: vec!["Keywords: spark".to_string()],
            edge_cases: vec![],
        };
        let json = serde_json::to_value(&conversion).unwrap();
        assert!(json.get("main_topic").is_some());
        assert!(json.get("sub_topics").is_some());
        assert!(json.get("edge_cases").is_some());
    }
}
