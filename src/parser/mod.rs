pub mod edge_cases;
pub mod lines;
pub mod subtopics;
pub mod topic;

pub use edge_cases::extract_edge_cases;
pub use subtopics::extract_sub_topics;
pub use topic::extract_main_topic;

/// State of a section walk. `Done` is terminal: once the target section ends
/// the walk stops for good instead of dropping back to `Outside`, so a second
/// header later in the document never reopens the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionScan {
    Outside,
    Inside,
    Done,
}

// ── Tests ──
