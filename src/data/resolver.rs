// ============================================================
// Layer 4 - Span Resolver
// ============================================================
// Converts a character span of the answer into the token span
// the reader model is trained to predict.
//
// Input:  the token offset table of the context, one half-open
//         character range per token, plus [start_char, end_char)
// Output: inclusive token indices (start, end)
//
// Example:
//   context  = "The quick brown fox"
//   offsets  = [(0,3) (4,9) (10,15) (16,19)]
//   answer   = "brown fox" → chars [10, 19)
//   start    = token containing char 10          → 2
//   end      = last token beginning before 19    → 3
//
// Boundary rules (off-by-one at token edges is the bug to avoid):
//   - start_char inside a token     → that token
//   - start_char in a gap           → the next token
//   - end_char on a token boundary  → the preceding token
//   - either side past the coverage → clamped to the last token
//   - (0, 0)                        → (0, 0), the "no answer" input
//
// Zero-width tokens (special tokens some tokenizers report as
// (0, 0)) never match either side.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::{
    span::{CharSpan, SpanTarget},
    traits::OffsetTokenizer,
};

/// Map `[start_char, end_char)` onto inclusive token indices.
///
/// Never fails: an empty offset table or the degenerate `(0, 0)`
/// span resolves to `(0, 0)`, out-of-range offsets are clamped.
pub fn resolve_span(offsets: &[(usize, usize)], start_char: usize, end_char: usize) -> SpanTarget {
    if start_char == 0 && end_char == 0 {
        return SpanTarget::default();
    }
    let Some(last) = offsets.len().checked_sub(1) else {
        return SpanTarget::default();
    };

    let start = offsets
        .iter()
        .position(|&(b, e)| e > b && e > start_char)
        .unwrap_or(last);

    let end = offsets
        .iter()
        .rposition(|&(b, e)| e > b && b < end_char)
        .unwrap_or(start);

    SpanTarget::new(start, end.max(start))
}

/// Owns the tokenizer capability and resolves spans against raw text.
#[derive(Clone)]
pub struct SpanResolver {
    tokenizer: Arc<dyn OffsetTokenizer>,
}

impl SpanResolver {
    pub fn new(tokenizer: Arc<dyn OffsetTokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Tokenize `context` once and resolve `span` against it.
    /// Tokenizer failures are returned to the caller untouched.
    pub fn resolve(&self, context: &str, span: CharSpan) -> Result<SpanTarget> {
        if span.start == 0 && span.end == 0 {
            return Ok(SpanTarget::default());
        }
        let offsets = self
            .tokenizer
            .offsets(context)
            .context("Tokenizer failed while resolving an answer span")?;
        Ok(resolve_span(&offsets, span.start, span.end))
    }
}
