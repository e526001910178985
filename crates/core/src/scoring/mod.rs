//! Submission completeness scoring.
//!
//! Grades a bundle of project-description documents on whether each
//! expected category is present and non-empty, and produces a follow-up
//! clarification prompt for the submitter. Scoring is purely structural:
//! no field inside a document is ever inspected.

mod scorer;
mod types;

pub use scorer::CompletenessScorer;
pub use types::{
    DocumentValue, ScoringResult, EXPECTED_CATEGORIES, PROMPT_ALL_DOCUMENTED, PROMPT_MISSING,
    UNRESOLVED_REFERENCES_NOTE,
};
