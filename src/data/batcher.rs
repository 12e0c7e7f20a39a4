// ============================================================
// Layer 4 - Batches and Burn Batchers
// ============================================================
// ReaderBatcher implements Burn's Batcher trait for the reader
// loader. It receives up to batch_size labelled items in pass order
// and produces a ReaderBatch: the (question, context, target)
// triples plus their targets stacked into tensors for a training
// step:
//
//   targets: [batch_size, 2]  one (start, end) row per example
//   located: [batch_size]     1 = answer found, 0 = (0, 0) fallback
//
// Questions and contexts stay strings: the reader tokenizes the
// question/context pair itself. If any item failed to label, the
// whole batch is that failure.
//
// QuestionBatcher does the same job for the generator loader, which
// has no targets at all and just groups rows.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::{LabelFailure, LabelledExample};
use crate::domain::{example::ReaderExample, question::QuestionRecord};

/// What the reader loader yields per batch.
pub type ReaderOutput<B> = std::result::Result<ReaderBatch<B>, LabelFailure>;

// ─── ReaderBatch ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct ReaderBatch<B: Backend> {
    pub examples: Vec<ReaderExample>,

    /// Token span targets, shape: [batch_size, 2]
    pub targets: Tensor<B, 2, Int>,

    /// Located mask, shape: [batch_size]
    pub located: Tensor<B, 1, Int>,
}

impl<B: Backend> ReaderBatch<B> {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

// ─── ReaderBatcher ────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct ReaderBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ReaderBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<LabelledExample, ReaderOutput<B>> for ReaderBatcher<B> {
    fn batch(&self, items: Vec<LabelledExample>) -> ReaderOutput<B> {
        let examples = items.into_iter().collect::<std::result::Result<Vec<_>, _>>()?;
        let batch_size = examples.len();

        // Row-major (start, end) pairs
        let target_flat: Vec<i32> = examples
            .iter()
            .flat_map(|e| e.span().as_pair())
            .map(|x| x as i32)
            .collect();

        let located_flat: Vec<i32> = examples
            .iter()
            .map(|e| e.is_located() as i32)
            .collect();

        let targets = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device
        ).reshape([batch_size, 2]);

        let located = Tensor::<B, 1, Int>::from_ints(
            located_flat.as_slice(), &self.device
        );

        Ok(ReaderBatch { examples, targets, located })
    }
}

// ─── QuestionBatch ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBatch {
    pub records: Vec<QuestionRecord>,
}

impl QuestionBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn questions(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.question.as_str()).collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct QuestionBatcher;

impl Batcher<QuestionRecord, QuestionBatch> for QuestionBatcher {
    fn batch(&self, items: Vec<QuestionRecord>) -> QuestionBatch {
        QuestionBatch { records: items }
    }
}
