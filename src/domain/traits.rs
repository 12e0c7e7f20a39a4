// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The three seams where an external collaborator plugs in:
//
//   RecordSource    - supplies the example store
//   OffsetTokenizer - tokenizes text and reports, per token, the
//                     character range it covers
//   QuestionSource  - supplies question-only rows for the
//                     question generator loader
//
// The data layer only ever sees these traits, so a fake
// tokenizer or an in-memory source can stand in for the real
// ones in tests.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::{qa_record::QaRecord, question::QuestionRecord, split::Split};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the ordered example store.
///
/// Implementations:
///   - JsonRecordSource → a .json array or .jsonl file
///   - Vec<QaRecord>    → records already in memory
pub trait RecordSource {
    /// Load every record, preserving source order.
    fn load_all(&self) -> Result<Vec<QaRecord>>;
}

impl RecordSource for Vec<QaRecord> {
    fn load_all(&self) -> Result<Vec<QaRecord>> {
        Ok(self.clone())
    }
}

// ─── OffsetTokenizer ──────────────────────────────────────────────────────────
/// Tokenizer capability required by the span resolver.
///
/// Implementations:
///   - tokenizers::Tokenizer → any HuggingFace fast tokenizer
pub trait OffsetTokenizer: Send + Sync {
    /// Tokenize `text` and return one half-open `(start, end)`
    /// character range per produced token, in token order.
    fn offsets(&self, text: &str) -> Result<Vec<(usize, usize)>>;
}

// ─── QuestionSource ───────────────────────────────────────────────────────────
/// Provider of question-only rows for one split.
///
/// Implementations:
///   - SquadSource → SQuAD v1.1 / v2.0 JSON files in a directory
pub trait QuestionSource {
    fn load_split(&self, split: Split) -> Result<Vec<QuestionRecord>>;
}
