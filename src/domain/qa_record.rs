// ============================================================
// Layer 3 - QaRecord Domain Type
// ============================================================
// One raw question/context/answer row from the example store.
//
// The upstream generation pipeline writes rows like:
//   { "question": "Who are intake creative project requests useful for?",
//     "context":  "Intake creative project requests tip uses an app ...",
//     "answer":   "Project managers, creative types, marketers",
//     "mlm":      0.26 }
//
// "mlm" is the precomputed relevance score and may be null or missing.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A raw labelled example. Read-only once loaded into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    /// The natural language question
    pub question: String,

    /// The passage the answer should be found in (untruncated)
    pub context: String,

    /// The answer text, expected to be an exact substring of `context`
    pub answer: String,

    /// Relevance signal computed upstream, if any
    #[serde(default, alias = "mlm")]
    pub relevance_score: Option<f64>,
}

impl QaRecord {
    pub fn new(
        question: impl Into<String>,
        context:  impl Into<String>,
        answer:   impl Into<String>,
    ) -> Self {
        Self {
            question:        question.into(),
            context:         context.into(),
            answer:          answer.into(),
            relevance_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mlm_alias_is_relevance_score() {
        let json = r#"{"question":"q","context":"c","answer":"a","mlm":0.26}"#;
        let rec: QaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.relevance_score, Some(0.26));
    }

    #[test]
    fn test_missing_or_null_score_is_none() {
        let missing: QaRecord =
            serde_json::from_str(r#"{"question":"q","context":"c","answer":"a"}"#).unwrap();
        let null: QaRecord =
            serde_json::from_str(r#"{"question":"q","context":"c","answer":"a","mlm":null}"#)
                .unwrap();
        assert_eq!(missing.relevance_score, None);
        assert_eq!(null.relevance_score, None);
    }
}
