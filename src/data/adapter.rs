// ============================================================
// Layer 4 - Example Adapter
// ============================================================
// Turns one QaRecord into the (question, context, target) triple
// handed to training:
//
//   1. Truncate the context to MAX_CONTEXT_CHARS characters
//   2. Find the answer in the TRUNCATED context (leftmost match)
//   3. Resolve the character span to token indices
//
// Truncation happens first so the offsets agree with the text the
// model actually sees. An answer that only occurs after the cut,
// or never occurs verbatim, is NotLocated: its target degrades to
// (0, 0) and a warning is logged, but iteration goes on.
//
// Reference: Rust Book §8 (Strings in Rust)

use anyhow::Result;

use crate::data::resolver::SpanResolver;
use crate::domain::{
    example::ReaderExample,
    qa_record::QaRecord,
    span::{AnswerTarget, CharSpan},
};

/// Contexts are cut to this many characters before labelling.
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// The first `MAX_CONTEXT_CHARS` characters of `context`.
pub fn truncate_context(context: &str) -> &str {
    match context.char_indices().nth(MAX_CONTEXT_CHARS) {
        Some((byte_idx, _)) => &context[..byte_idx],
        None                => context,
    }
}

/// Character span of the leftmost occurrence of `answer` in `context`.
/// An empty answer is never located.
pub fn locate_answer(context: &str, answer: &str) -> Option<CharSpan> {
    if answer.is_empty() {
        return None;
    }
    let byte_idx = context.find(answer)?;
    let start    = context[..byte_idx].chars().count();
    Some(CharSpan::new(start, start + answer.chars().count()))
}

/// Label one record. `index` is the record's position inside its split.
pub fn label_record(
    index:    usize,
    record:   &QaRecord,
    resolver: &SpanResolver,
) -> Result<ReaderExample> {
    let context = truncate_context(&record.context);

    let target = match locate_answer(context, &record.answer) {
        Some(chars) => AnswerTarget::Located(resolver.resolve(context, chars)?),
        None => {
            tracing::warn!(
                index,
                answer = %record.answer,
                "Answer not found in truncated context, labelling as (0, 0)"
            );
            AnswerTarget::NotLocated
        }
    };

    Ok(ReaderExample {
        index,
        question: record.question.clone(),
        context:  context.to_string(),
        answer:   record.answer.clone(),
        target,
    })
}
