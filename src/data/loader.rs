// ============================================================
// Layer 4 - Batch Loaders
// ============================================================
// Two loaders live here, both built with Burn's DataLoaderBuilder:
//
//   ReaderLoader               - labelled reader batches over one
//                                side of the partition
//   question_generator_loader  - question-only batches for the
//                                question generator
//
// Burn pulls items from the dataset one index at a time, so a
// reader example is only labelled when the batch holding it is
// requested. With shuffling on, Burn draws a new permutation at the
// start of every pass.
//
// Labelling can fail (the tokenizer is an external component). The
// failure rides inside the batch output, and ReaderBatches turns it
// back into an error and ends the pass there.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::{fs, path::Path, sync::Arc};

use anyhow::{ensure, Context, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder, DataLoaderIterator},
    prelude::Backend,
};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::{QuestionBatch, QuestionBatcher, ReaderBatch, ReaderBatcher, ReaderOutput},
    dataset::{ExampleStore, QuestionDataset, ReaderDataset},
    splitter::{validate_train_fraction, DEFAULT_TRAIN_FRACTION},
};
use crate::domain::{
    split::Split,
    traits::{OffsetTokenizer, QuestionSource},
};

// ─── Reader Loader Configuration ─────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub batch_size:     usize,
    pub split:          Split,
    pub train_fraction: f64,

    /// Reshuffle the split before every pass
    pub shuffle: bool,

    /// Seed for the shuffle; a fresh entropy seed when unset
    pub seed: Option<u64>,

    /// Drop examples whose answer was not located instead of
    /// emitting them with a (0, 0) target
    pub skip_unlocated: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size:     1,
            split:          Split::Train,
            train_fraction: DEFAULT_TRAIN_FRACTION,
            shuffle:        false,
            seed:           None,
            skip_unlocated: false,
        }
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be positive");
        validate_train_fraction(self.train_fraction)
    }

    /// Read a config from JSON. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read loader config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid loader config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ─── ReaderLoader ─────────────────────────────────────────────────────────────
pub struct ReaderLoader<B: Backend> {
    inner:      Arc<dyn DataLoader<ReaderOutput<B>>>,
    batch_size: usize,
}

impl<B: Backend> ReaderLoader<B> {
    pub fn new(dataset: ReaderDataset, config: &LoaderConfig, device: B::Device) -> Result<Self> {
        config.validate()?;

        let dataset = if config.skip_unlocated {
            dataset.located_only()
        } else {
            dataset
        };

        let mut builder = DataLoaderBuilder::new(ReaderBatcher::<B>::new(device))
            .batch_size(config.batch_size);
        if config.shuffle {
            builder = builder.shuffle(config.seed.unwrap_or_else(rand::random));
        }

        Ok(Self {
            inner:      builder.build(dataset),
            batch_size: config.batch_size,
        })
    }

    /// Partition `store` by the config's split and fraction, then wrap it.
    pub fn from_store(
        store:     ExampleStore,
        tokenizer: Arc<dyn OffsetTokenizer>,
        config:    &LoaderConfig,
        device:    B::Device,
    ) -> Result<Self> {
        config.validate()?;
        let dataset = ReaderDataset::new(store, tokenizer, config.split, config.train_fraction)?;
        Self::new(dataset, config, device)
    }

    pub fn num_items(&self) -> usize {
        self.inner.num_items()
    }

    /// Batches in one pass, ceil(items / batch_size)
    pub fn num_batches(&self) -> usize {
        self.num_items().div_ceil(self.batch_size)
    }

    /// Start a new pass over the split.
    pub fn iter(&self) -> ReaderBatches<'_, B> {
        ReaderBatches {
            inner: self.inner.iter(),
            done:  false,
        }
    }
}

/// One pass of a ReaderLoader. Ends after the first failed batch.
pub struct ReaderBatches<'a, B: Backend> {
    inner: Box<dyn DataLoaderIterator<ReaderOutput<B>> + 'a>,
    done:  bool,
}

impl<B: Backend> Iterator for ReaderBatches<'_, B> {
    type Item = Result<ReaderBatch<B>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.inner.next() {
            Some(Ok(batch)) => Some(Ok(batch)),
            Some(Err(failure)) => {
                self.done = true;
                Some(Err(failure.into()))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

// ─── Question Generator Loader ────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionLoaderConfig {
    pub batch_size: usize,
    pub shuffle:    bool,
    pub seed:       Option<u64>,
}

impl Default for QuestionLoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8,
            shuffle:    true,
            seed:       None,
        }
    }
}

impl QuestionLoaderConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be positive");
        Ok(())
    }
}

/// Batch the question-only rows of `split` from `source`.
pub fn question_generator_loader(
    source: &dyn QuestionSource,
    split:  Split,
    config: &QuestionLoaderConfig,
) -> Result<Arc<dyn DataLoader<QuestionBatch>>> {
    config.validate()?;

    let records = source
        .load_split(split)
        .with_context(|| format!("Cannot load {split} questions"))?;
    tracing::info!("Loaded {} {} questions", records.len(), split);

    let mut builder = DataLoaderBuilder::new(QuestionBatcher).batch_size(config.batch_size);
    if config.shuffle {
        builder = builder.shuffle(config.seed.unwrap_or_else(rand::random));
    }

    Ok(builder.build(QuestionDataset::new(records)))
}
