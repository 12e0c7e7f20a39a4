// ============================================================
// Layer 3 - Span Types
// ============================================================
// Two coordinate systems meet in this crate:
//
//   CharSpan   - half-open character range [start, end) in the
//                (truncated) context string
//   SpanTarget - inclusive token range [start, end] in the
//                tokenized context, the reader model's target
//
// "Character" always means a Unicode scalar value (a Rust `char`),
// never a byte, so offsets agree with what `str::chars` yields.
//
// AnswerTarget makes the "answer not found" case explicit instead
// of hiding it behind a (0, 0) sentinel.

use serde::{Deserialize, Serialize};

/// Half-open character range of an answer inside its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSpan {
    pub start: usize,
    pub end:   usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "char span start {start} > end {end}");
        Self { start, end }
    }
}

/// Token-index target for the reader model.
///
/// Both ends are inclusive: the answer covers tokens
/// `start..=end` of the tokenized context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanTarget {
    pub start: usize,
    pub end:   usize,
}

impl SpanTarget {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of tokens covered by the span
    pub fn span_length(&self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }

    /// The pair as the model consumes it
    pub fn as_pair(&self) -> [usize; 2] {
        [self.start, self.end]
    }
}

/// Outcome of labelling one example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerTarget {
    /// The answer was found in the truncated context
    Located(SpanTarget),

    /// The answer does not occur in the truncated context
    /// (paraphrased, empty, or cut off by truncation)
    NotLocated,
}

impl AnswerTarget {
    /// The token span fed to training. `NotLocated` degrades to `(0, 0)`.
    pub fn span(&self) -> SpanTarget {
        match self {
            AnswerTarget::Located(span) => *span,
            AnswerTarget::NotLocated    => SpanTarget::default(),
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self, AnswerTarget::Located(_))
    }
}
