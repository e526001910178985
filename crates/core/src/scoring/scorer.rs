//! Completeness scorer implementation.

use std::collections::HashMap;

use tracing::debug;

use super::types::{
    DocumentValue, ScoringResult, EXPECTED_CATEGORIES, PROMPT_ALL_DOCUMENTED, PROMPT_MISSING,
    UNRESOLVED_REFERENCES_NOTE,
};

/// Grades a submission on whether each expected category is present.
///
/// Pure and deterministic: two calls with equal inputs yield equal
/// results, and no call can fail. Unknown categories in the input are
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletenessScorer;

impl CompletenessScorer {
    /// Create a new scorer. No configuration, no I/O.
    pub fn new() -> Self {
        Self
    }

    /// Score a category-to-document mapping.
    ///
    /// Each of the eight expected categories contributes an equal share of
    /// the 100-point total when it is present and non-empty. The final
    /// score is rounded half away from zero.
    pub fn score_submission(
        &self,
        documents: &HashMap<String, DocumentValue>,
    ) -> ScoringResult {
        let weight = 100.0 / EXPECTED_CATEGORIES.len() as f64;
        let mut earned = 0.0_f64;
        let mut missing_categories = Vec::new();

        for category in EXPECTED_CATEGORIES {
            match documents.get(category) {
                Some(value) if value.is_present() => earned += weight,
                _ => missing_categories.push(category.to_string()),
            }
        }

        let score = earned.round() as i32;

        let unresolved_references = if missing_categories.is_empty() {
            Vec::new()
        } else {
            vec![UNRESOLVED_REFERENCES_NOTE.to_string()]
        };

        let prompt = if missing_categories.is_empty() {
            PROMPT_ALL_DOCUMENTED
        } else {
            PROMPT_MISSING
        }
        .to_string();

        debug!(
            score,
            missing = missing_categories.len(),
            "Scored submission"
        );

        ScoringResult {
            score,
            missing_categories,
            unresolved_references,
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(categories: &[&str]) -> HashMap<String, DocumentValue> {
        categories
            .iter()
            .map(|c| (c.to_string(), DocumentValue::from(json!([{"id": "x"}]))))
            .collect()
    }

    #[test]
    fn test_empty_submission() {
        let scorer = CompletenessScorer::new();
        let result = scorer.score_submission(&HashMap::new());

        assert_eq!(result.score, 0);
        assert_eq!(result.missing_categories, EXPECTED_CATEGORIES);
        assert_eq!(
            result.unresolved_references,
            vec![UNRESOLVED_REFERENCES_NOTE.to_string()]
        );
        assert_eq!(result.prompt, PROMPT_MISSING);
    }

    #[test]
    fn test_two_present_six_missing() {
        let scorer = CompletenessScorer::new();
        let mut documents = HashMap::new();
        documents.insert(
            "contracts".to_string(),
            DocumentValue::from(json!([{"id": "c1"}])),
        );
        documents.insert(
            "risks".to_string(),
            DocumentValue::from(json!([{"id": "r1"}])),
        );

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 25);
        assert_eq!(result.missing_categories.len(), 6);
    }

    #[test]
    fn test_all_present() {
        let scorer = CompletenessScorer::new();
        let documents = submission(&EXPECTED_CATEGORIES);

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 100);
        assert!(result.missing_categories.is_empty());
        assert!(result.unresolved_references.is_empty());
        assert_eq!(result.prompt, PROMPT_ALL_DOCUMENTED);
    }

    #[test]
    fn test_present_but_empty_counts_as_missing() {
        let scorer = CompletenessScorer::new();
        let documents: HashMap<String, DocumentValue> = EXPECTED_CATEGORIES
            .iter()
            .map(|c| (c.to_string(), DocumentValue::from(json!([]))))
            .collect();

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_categories.len(), 8);
    }

    #[test]
    fn test_mapping_counts_as_present() {
        let scorer = CompletenessScorer::new();
        let mut documents = submission(&EXPECTED_CATEGORIES[1..]);
        documents.insert(
            "project_overview".to_string(),
            DocumentValue::from(json!({"name": "blueprint"})),
        );

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_scalar_counts_as_missing() {
        let scorer = CompletenessScorer::new();
        let mut documents = submission(&EXPECTED_CATEGORIES[1..]);
        documents.insert(
            "project_overview".to_string(),
            DocumentValue::from(json!("a one-line summary")),
        );

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 88);
        assert_eq!(
            result.missing_categories,
            vec!["project_overview".to_string()]
        );
    }

    #[test]
    fn test_unknown_categories_ignored() {
        let scorer = CompletenessScorer::new();
        let mut documents = HashMap::new();
        documents.insert(
            "deployment_notes".to_string(),
            DocumentValue::from(json!([{"env": "prod"}])),
        );

        let result = scorer.score_submission(&documents);
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_categories.len(), 8);
    }

    #[test]
    fn test_missing_categories_keep_canonical_order() {
        let scorer = CompletenessScorer::new();
        // Present: tech_stack and risks; the rest must come back in
        // declaration order regardless of map iteration order.
        let documents = submission(&["tech_stack", "risks"]);

        let result = scorer.score_submission(&documents);
        assert_eq!(
            result.missing_categories,
            vec![
                "project_overview",
                "modules",
                "apis",
                "data_models",
                "contracts",
                "change_sensitivity",
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let scorer = CompletenessScorer::new();
        let documents = submission(&["modules", "apis", "risks"]);

        let first = scorer.score_submission(&documents);
        let second = scorer.score_submission(&documents);
        assert_eq!(first, second);
    }

    #[test]
    fn test_attainable_scores() {
        let scorer = CompletenessScorer::new();
        let expected_scores = [0, 13, 25, 38, 50, 63, 75, 88, 100];

        for present in 0..=EXPECTED_CATEGORIES.len() {
            let documents = submission(&EXPECTED_CATEGORIES[..present]);
            let result = scorer.score_submission(&documents);
            assert_eq!(result.score, expected_scores[present]);
        }
    }

    #[test]
    fn test_conservation() {
        let scorer = CompletenessScorer::new();
        for present in 0..=EXPECTED_CATEGORIES.len() {
            let documents = submission(&EXPECTED_CATEGORIES[..present]);
            let result = scorer.score_submission(&documents);
            assert_eq!(result.missing_categories.len() + present, 8);
        }
    }

    #[test]
    fn test_unresolved_refs_iff_missing() {
        let scorer = CompletenessScorer::new();

        let complete = scorer.score_submission(&submission(&EXPECTED_CATEGORIES));
        assert!(complete.unresolved_references.is_empty());

        let partial = scorer.score_submission(&submission(&EXPECTED_CATEGORIES[..7]));
        assert_eq!(partial.unresolved_references.len(), 1);
    }
}
