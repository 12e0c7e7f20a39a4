// ============================================================
// Layer 3 - ReaderExample Domain Type
// ============================================================
// The (question, context, target) triple produced per record
// at iteration time. `context` is the truncated context, i.e.
// exactly the text the target's token indices refer to.
//
// Reference: Devlin et al. (2019) - BERT paper (span targets)

use serde::{Deserialize, Serialize};

use crate::domain::span::{AnswerTarget, SpanTarget};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderExample {
    /// Position of the source record inside its split
    pub index: usize,

    pub question: String,

    /// Context after truncation
    pub context: String,

    pub answer: String,

    pub target: AnswerTarget,
}

impl ReaderExample {
    /// Token span used as the training target, `(0, 0)` when not located
    pub fn span(&self) -> SpanTarget {
        self.target.span()
    }

    pub fn is_located(&self) -> bool {
        self.target.is_located()
    }
}
