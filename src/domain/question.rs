// ============================================================
// Layer 3 - QuestionRecord Domain Type
// ============================================================
// A question-only row for the question generator loader.
// Shaped after one flattened SQuAD row; nothing here is
// span-labelled, the loader passes rows through unchanged.
//
// Reference: Rajpurkar et al. (2016) - SQuAD

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SquadAnswers {
    pub text:         Vec<String>,
    pub answer_start: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id:       String,
    #[serde(default)]
    pub title:    String,
    pub context:  String,
    pub question: String,
    #[serde(default)]
    pub answers:  SquadAnswers,
}
