//! Scoring input and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Expected top-level categories of a project-description submission,
/// in canonical order. The order fixes the order of
/// [`ScoringResult::missing_categories`].
pub const EXPECTED_CATEGORIES: [&str; 8] = [
    "project_overview",
    "tech_stack",
    "modules",
    "apis",
    "data_models",
    "contracts",
    "risks",
    "change_sensitivity",
];

/// Prompt returned when every expected category is documented.
pub const PROMPT_ALL_DOCUMENTED: &str = "All categories are documented.";

/// Prompt returned when at least one expected category is missing.
pub const PROMPT_MISSING: &str =
    "Are there any additional undocumented items for the missing categories?";

/// Diagnostic recorded when cross-references cannot be resolved because
/// categories are missing.
pub const UNRESOLVED_REFERENCES_NOTE: &str =
    "Cannot resolve cross-references for missing categories";

/// A single submitted document bundle entry.
///
/// Only the structural shape matters to the scorer: a non-empty sequence
/// or mapping counts as present, everything else counts as missing.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// A sequence of records.
    Sequence(Vec<Value>),
    /// A named mapping of attributes.
    Mapping(Map<String, Value>),
    /// A bare scalar (string, number, boolean).
    Scalar(Value),
    /// An explicit null.
    Null,
}

impl DocumentValue {
    /// Returns true when the value counts as a present, non-empty document.
    ///
    /// Presence is length-based, not content-based: a sequence of null
    /// entries still counts as present.
    pub fn is_present(&self) -> bool {
        match self {
            DocumentValue::Sequence(items) => !items.is_empty(),
            DocumentValue::Mapping(entries) => !entries.is_empty(),
            DocumentValue::Scalar(_) | DocumentValue::Null => false,
        }
    }
}

impl From<Value> for DocumentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => DocumentValue::Sequence(items),
            Value::Object(entries) => DocumentValue::Mapping(entries),
            Value::Null => DocumentValue::Null,
            other => DocumentValue::Scalar(other),
        }
    }
}

/// Result of grading a submission for completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Completeness score in [0, 100].
    pub score: i32,
    /// Expected categories missing from the submission, in canonical order.
    pub missing_categories: Vec<String>,
    /// Diagnostics about cross-entity references that could not be resolved.
    pub unresolved_references: Vec<String>,
    /// Follow-up clarification prompt for the submitter.
    pub prompt: String,
}
