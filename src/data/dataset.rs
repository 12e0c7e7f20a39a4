// ============================================================
// Layer 4 - Datasets
// ============================================================
// ReaderDataset is a read-only view of one side of the partition.
// It stores no labelled data: every call to `example(i)` truncates,
// locates and resolves record i on demand, so a partial pass only
// pays for the records it touches.
//
// Both datasets implement Burn's Dataset trait so Burn's DataLoader
// can index into them. Burn items must be Clone, so a labelling
// failure travels inside the item as a LabelFailure and is raised
// again once the batch comes out of the loader.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::{fmt, ops::Range, sync::Arc};

use anyhow::{bail, Result};
use burn::data::dataset::Dataset;

use crate::data::{
    adapter::{label_record, locate_answer, truncate_context},
    resolver::SpanResolver,
    splitter::Partition,
};
use crate::domain::{
    example::ReaderExample,
    qa_record::QaRecord,
    question::QuestionRecord,
    split::Split,
    traits::OffsetTokenizer,
};

/// The shared, immutable example store.
pub type ExampleStore = Arc<[QaRecord]>;

/// What the reader dataset hands to Burn for one index.
pub type LabelledExample = std::result::Result<ReaderExample, LabelFailure>;

/// A record that could not be labelled, usually a tokenizer error.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFailure {
    pub split:   Split,
    pub index:   usize,
    pub message: String,
}

impl fmt::Display for LabelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to label {} example {}: {}",
            self.split, self.index, self.message
        )
    }
}

impl std::error::Error for LabelFailure {}

pub struct ReaderDataset {
    store:    ExampleStore,
    range:    Range<usize>,
    /// Positions inside `range` this view exposes, in order
    rows:     Vec<usize>,
    split:    Split,
    resolver: SpanResolver,
}

impl ReaderDataset {
    /// Carve `split` out of `store` once; the view is fixed afterwards.
    pub fn new(
        store:          ExampleStore,
        tokenizer:      Arc<dyn OffsetTokenizer>,
        split:          Split,
        train_fraction: f64,
    ) -> Result<Self> {
        let partition = Partition::new(store.len(), train_fraction)?;
        let range     = partition.range(split);

        tracing::info!(
            "{} split: {} of {} records",
            split,
            range.len(),
            store.len()
        );

        Ok(Self {
            rows: (0..range.len()).collect(),
            store,
            range,
            split,
            resolver: SpanResolver::new(tokenizer),
        })
    }

    /// Keep only records whose answer occurs in the truncated context.
    /// Needs no tokenizer, so nothing is resolved here.
    pub fn located_only(mut self) -> Self {
        let before = self.rows.len();
        let (store, start) = (&self.store, self.range.start);
        self.rows.retain(|&row| {
            let record = &store[start + row];
            locate_answer(truncate_context(&record.context), &record.answer).is_some()
        });

        tracing::debug!(
            "{} split: dropped {} examples with unlocated answers",
            self.split,
            before - self.rows.len()
        );
        self
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The raw record at `index` within this view
    pub fn record(&self, index: usize) -> Option<&QaRecord> {
        let row = self.rows.get(index)?;
        self.store.get(self.range.start + row)
    }

    /// Label the record at `index` within this split.
    pub fn example(&self, index: usize) -> Result<ReaderExample> {
        let Some(record) = self.record(index) else {
            bail!(
                "Index {} out of range for {} split of {} records",
                index,
                self.split,
                self.len()
            );
        };
        label_record(self.rows[index], record, &self.resolver)
    }
}

impl Dataset<LabelledExample> for ReaderDataset {
    fn get(&self, index: usize) -> Option<LabelledExample> {
        if index >= self.len() {
            return None;
        }
        Some(self.example(index).map_err(|e| LabelFailure {
            split:   self.split,
            index,
            message: format!("{e:#}"),
        }))
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// ─── QuestionDataset ──────────────────────────────────────────────────────────
pub struct QuestionDataset {
    records: Vec<QuestionRecord>,
}

impl QuestionDataset {
    pub fn new(records: Vec<QuestionRecord>) -> Self { Self { records } }
}

impl Dataset<QuestionRecord> for QuestionDataset {
    fn get(&self, index: usize) -> Option<QuestionRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
