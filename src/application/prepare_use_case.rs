// ============================================================
// Layer 2 - PrepareUseCase
// ============================================================
// Orchestrates the reader data pipeline:
//
//   Step 1: Load the example store       (Layer 4 - data)
//   Step 2: Load or build the tokenizer  (Layer 5 - infra)
//   Step 3: Build the split's loader     (Layer 4 - data)
//   Step 4: Pull batches and emit them   (JSON lines)
//
// `stats` runs the same pipeline over both splits and tallies how
// many answers were actually located.

use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use burn::backend::{ndarray::NdArrayDevice, NdArray};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::ExampleStore,
    loader::{LoaderConfig, ReaderLoader},
    source::JsonRecordSource,
};
use crate::domain::{split::Split, traits::{OffsetTokenizer, RecordSource}};
use crate::infra::{
    report::{ReportWriter, SplitStats},
    tokenizer_store::{load_tokenizer_file, TokenizerStore},
};

/// Target tensors are built on the CPU; nothing here trains.
type DataBackend = NdArray;

// ─── Prepare Configuration ────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// .json or .jsonl file of question/context/answer records
    pub records: PathBuf,

    /// Pretrained tokenizer.json; when absent a whitespace
    /// tokenizer is loaded from or built into `tokenizer_dir`
    pub tokenizer: Option<PathBuf>,

    pub tokenizer_dir: PathBuf,

    pub loader: LoaderConfig,

    /// Stop after this many batches
    pub limit: Option<usize>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            records:       PathBuf::from("data/qa_records.json"),
            tokenizer:     None,
            tokenizer_dir: PathBuf::from("artifacts"),
            loader:        LoaderConfig::default(),
            limit:         None,
        }
    }
}

/// One emitted JSON line
#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    batch:    usize,
    split:    Split,
    examples: Vec<ExampleLine<'a>>,
}

#[derive(Debug, Serialize)]
struct ExampleLine<'a> {
    question: &'a str,
    context:  &'a str,
    target:   [usize; 2],
    located:  bool,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Write the configured split's batches to `out`, one JSON line each.
    /// Returns the number of batches written.
    pub fn write_batches<W: Write>(&self, mut out: W) -> Result<usize> {
        let cfg = &self.config;
        cfg.loader.validate()?;

        let store     = self.load_store()?;
        let tokenizer = self.load_tokenizer()?;
        let loader    = ReaderLoader::<DataBackend>::from_store(
            store,
            tokenizer,
            &cfg.loader,
            NdArrayDevice::Cpu,
        )?;
        tracing::info!(
            "Emitting up to {} batches of {} from the {} split",
            loader.num_batches(),
            cfg.loader.batch_size,
            cfg.loader.split
        );

        let limit = cfg.limit.unwrap_or(usize::MAX);
        let mut written = 0;
        for (i, batch) in loader.iter().take(limit).enumerate() {
            let batch = batch?;
            tracing::debug!(batch = i, targets = ?batch.targets.dims(), "Batch ready");

            let line  = BatchLine {
                batch:    i,
                split:    cfg.loader.split,
                examples: batch
                    .examples
                    .iter()
                    .map(|e| ExampleLine {
                        question: &e.question,
                        context:  &e.context,
                        target:   e.span().as_pair(),
                        located:  e.is_located(),
                    })
                    .collect(),
            };
            serde_json::to_writer(&mut out, &line)?;
            writeln!(out)?;
            written += 1;
        }

        out.flush()?;
        tracing::info!("Wrote {} batches", written);
        Ok(written)
    }

    /// Label every example of both splits and tally the outcome.
    /// Rows are appended to `<report_dir>/label_report.csv` when given.
    pub fn stats(&self, report_dir: Option<PathBuf>) -> Result<Vec<SplitStats>> {
        let cfg       = &self.config;
        let store     = self.load_store()?;
        let tokenizer = self.load_tokenizer()?;
        let writer    = report_dir.map(ReportWriter::new).transpose()?;

        let mut all = Vec::new();
        for split in [Split::Train, Split::Validation] {
            let loader_cfg = LoaderConfig {
                split,
                shuffle:        false,
                skip_unlocated: false,
                ..cfg.loader.clone()
            };
            let loader = ReaderLoader::<DataBackend>::from_store(
                store.clone(),
                tokenizer.clone(),
                &loader_cfg,
                NdArrayDevice::Cpu,
            )?;

            let mut stats = SplitStats::new(split);
            for batch in loader.iter() {
                for ex in &batch?.examples {
                    stats.record(ex);
                }
            }

            tracing::info!(
                "{}: {} examples, {} located ({:.1}%)",
                split,
                stats.examples,
                stats.located,
                stats.located_pct()
            );
            if stats.not_located > 0 {
                tracing::warn!(
                    "{}: {} examples fall back to a (0, 0) target",
                    split,
                    stats.not_located
                );
            }
            if let Some(w) = &writer {
                w.log(&stats)?;
            }
            all.push(stats);
        }
        Ok(all)
    }

    fn load_store(&self) -> Result<ExampleStore> {
        let records = JsonRecordSource::new(&self.config.records).load_all()?;
        Ok(records.into())
    }

    fn load_tokenizer(&self) -> Result<Arc<dyn OffsetTokenizer>> {
        let cfg = &self.config;
        let tokenizer = match &cfg.tokenizer {
            Some(path) => load_tokenizer_file(path)?,
            None => TokenizerStore::new(&cfg.tokenizer_dir)
                .load_or_build()
                .context("Cannot prepare a tokenizer")?,
        };
        Ok(Arc::new(tokenizer))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_records(dir: &std::path::Path, n: usize) -> PathBuf {
        let path = dir.join("records.jsonl");
        let mut lines = String::new();
        for i in 0..n {
            // every third answer is paraphrased and cannot be located
            let answer = if i % 3 == 2 { "not in there".to_string() } else { format!("word{i}") };
            let rec = serde_json::json!({
                "question": format!("Where is word{i}?"),
                "context":  format!("The context holds word{i} near the end."),
                "answer":   answer,
                "mlm":      null,
            });
            lines.push_str(&rec.to_string());
            lines.push('\n');
        }
        fs::write(&path, lines).unwrap();
        path
    }

    fn config(dir: &std::path::Path, n: usize) -> PrepareConfig {
        PrepareConfig {
            records:       write_records(dir, n),
            tokenizer_dir: dir.join("artifacts"),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_batches_emits_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), 10);
        cfg.loader.batch_size = 3;

        let mut out = Vec::<u8>::new();
        let written = PrepareUseCase::new(cfg).write_batches(&mut out).unwrap();
        assert_eq!(written, 3);

        let text  = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["split"], "train");
        assert_eq!(lines[0]["examples"].as_array().unwrap().len(), 3);

        // "The context holds word0 near the end." → word0 is token 3
        assert_eq!(lines[0]["examples"][0]["target"], serde_json::json!([3, 3]));
        assert_eq!(lines[0]["examples"][2]["located"], false);
        assert_eq!(lines[0]["examples"][2]["target"], serde_json::json!([0, 0]));

        // the whitespace tokenizer was built and saved
        assert!(dir.path().join("artifacts/tokenizer.json").exists());
    }

    #[test]
    fn test_limit_stops_early() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), 10);
        cfg.limit = Some(2);

        let mut out = Vec::<u8>::new();
        assert_eq!(PrepareUseCase::new(cfg).write_batches(&mut out).unwrap(), 2);
    }

    #[test]
    fn test_stats_cover_both_splits() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), 10);
        let report_dir = dir.path().join("report");

        let stats = PrepareUseCase::new(cfg).stats(Some(report_dir.clone())).unwrap();
        assert_eq!(stats.len(), 2);

        // train = records 0..7, of which 2 and 5 are paraphrased
        assert_eq!(stats[0].examples, 7);
        assert_eq!(stats[0].not_located, 2);
        // validation = records 7..10, of which 8 is paraphrased
        assert_eq!(stats[1].examples, 3);
        assert_eq!(stats[1].not_located, 1);

        let csv = fs::read_to_string(report_dir.join("label_report.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_invalid_fraction_is_rejected_before_loading() {
        let mut cfg = PrepareConfig::default();
        cfg.records = PathBuf::from("/nonexistent.json");
        cfg.loader.train_fraction = 0.0;

        let err = PrepareUseCase::new(cfg).write_batches(Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("train_fraction"));
    }
}
