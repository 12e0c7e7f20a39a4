// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Three subcommands: `batches`, `stats` and `questions`.
// Each Args struct converts into its application-layer config,
// so the application layer never sees clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::{prepare_use_case::PrepareConfig, questions_use_case::QuestionsConfig};
use crate::data::loader::{LoaderConfig, QuestionLoaderConfig};
use crate::domain::split::Split;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Label reader examples and print one split as JSON-line batches
    Batches(BatchesArgs),

    /// Count located / not-located answers in both splits
    Stats(StatsArgs),

    /// Print question-only SQuAD batches for the question generator
    Questions(QuestionsArgs),
}

/// Where records and the tokenizer come from
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Records file (.json array or .jsonl)
    #[arg(long, default_value = "data/qa_records.json")]
    pub records: PathBuf,

    /// Pretrained HuggingFace tokenizer.json
    /// (a whitespace tokenizer is built when omitted)
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,

    /// Where a built tokenizer is saved and looked up
    #[arg(long, default_value = "artifacts")]
    pub tokenizer_dir: PathBuf,

    /// Share of records used for training, in (0, 1) [default: 0.7]
    #[arg(long)]
    pub train_fraction: Option<f64>,

    /// JSON loader config; explicit flags are applied on top
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BatchesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// "train", anything else is the validation split [default: train]
    #[arg(long)]
    pub split: Option<String>,

    /// [default: 1]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Reshuffle the split before the pass
    #[arg(long)]
    pub shuffle: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop examples whose answer is not in the truncated context
    #[arg(long)]
    pub skip_unlocated: bool,

    /// Stop after this many batches
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Append rows to <dir>/label_report.csv
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Directory holding train-v1.1.json / dev-v1.1.json
    #[arg(long, default_value = "data/squad")]
    pub squad_dir: PathBuf,

    #[arg(long, default_value = "train")]
    pub split: String,

    #[arg(long, default_value_t = 8)]
    pub batch_size: usize,

    /// Keep file order instead of shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub limit: Option<usize>,
}

impl SourceArgs {
    fn base_loader(&self) -> Result<LoaderConfig> {
        match &self.config {
            Some(path) => LoaderConfig::from_json_file(path),
            None       => Ok(LoaderConfig::default()),
        }
    }

    fn into_prepare(self, loader: LoaderConfig, limit: Option<usize>) -> PrepareConfig {
        PrepareConfig {
            records:       self.records,
            tokenizer:     self.tokenizer,
            tokenizer_dir: self.tokenizer_dir,
            loader,
            limit,
        }
    }
}

impl TryFrom<BatchesArgs> for PrepareConfig {
    type Error = anyhow::Error;

    fn try_from(a: BatchesArgs) -> Result<Self> {
        let base   = a.source.base_loader()?;
        let loader = LoaderConfig {
            batch_size:     a.batch_size.unwrap_or(base.batch_size),
            split:          a.split.as_deref().map_or(base.split, Split::from_name),
            train_fraction: a.source.train_fraction.unwrap_or(base.train_fraction),
            shuffle:        a.shuffle || base.shuffle,
            seed:           a.seed.or(base.seed),
            skip_unlocated: a.skip_unlocated || base.skip_unlocated,
        };
        Ok(a.source.into_prepare(loader, a.limit))
    }
}

impl TryFrom<StatsArgs> for PrepareConfig {
    type Error = anyhow::Error;

    fn try_from(a: StatsArgs) -> Result<Self> {
        let base   = a.source.base_loader()?;
        let loader = LoaderConfig {
            train_fraction: a.source.train_fraction.unwrap_or(base.train_fraction),
            ..base
        };
        Ok(a.source.into_prepare(loader, None))
    }
}

impl From<QuestionsArgs> for QuestionsConfig {
    fn from(a: QuestionsArgs) -> Self {
        QuestionsConfig {
            squad_dir: a.squad_dir,
            split:     Split::from_name(&a.split),
            loader:    QuestionLoaderConfig {
                batch_size: a.batch_size,
                shuffle:    !a.no_shuffle,
                seed:       a.seed,
            },
            limit:     a.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_batches_defaults() {
        let cli = Cli::try_parse_from(["qa-reader-data", "batches"]).unwrap();
        let Commands::Batches(args) = cli.command else { panic!("expected batches") };
        let cfg = PrepareConfig::try_from(args).unwrap();

        assert_eq!(cfg.loader, LoaderConfig::default());
        assert_eq!(cfg.records, PathBuf::from("data/qa_records.json"));
        assert!(cfg.tokenizer.is_none());
    }

    #[test]
    fn test_batches_flags() {
        let cli = Cli::try_parse_from([
            "qa-reader-data", "batches",
            "--split", "valid",
            "--batch-size", "4",
            "--train-fraction", "0.8",
            "--shuffle",
            "--seed", "9",
            "--skip-unlocated",
        ])
        .unwrap();
        let Commands::Batches(args) = cli.command else { panic!("expected batches") };
        let cfg = PrepareConfig::try_from(args).unwrap();

        assert_eq!(cfg.loader.split, Split::Validation);
        assert_eq!(cfg.loader.batch_size, 4);
        assert_eq!(cfg.loader.train_fraction, 0.8);
        assert!(cfg.loader.shuffle);
        assert_eq!(cfg.loader.seed, Some(9));
        assert!(cfg.loader.skip_unlocated);
    }

    #[test]
    fn test_config_file_values_survive_unset_flags() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.json");
        std::fs::write(
            &path,
            r#"{"batch_size": 4, "split": "validation", "train_fraction": 0.8, "seed": 3}"#,
        )
        .unwrap();
        let config = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["qa-reader-data", "batches", "--config", config]).unwrap();
        let Commands::Batches(args) = cli.command else { panic!("expected batches") };
        let cfg = PrepareConfig::try_from(args).unwrap();
        assert_eq!(cfg.loader.batch_size, 4);
        assert_eq!(cfg.loader.split, Split::Validation);
        assert_eq!(cfg.loader.train_fraction, 0.8);
        assert_eq!(cfg.loader.seed, Some(3));

        // explicit flags still win
        let cli = Cli::try_parse_from([
            "qa-reader-data", "batches", "--config", config, "--batch-size", "2", "--split", "train",
        ])
        .unwrap();
        let Commands::Batches(args) = cli.command else { panic!("expected batches") };
        let cfg = PrepareConfig::try_from(args).unwrap();
        assert_eq!(cfg.loader.batch_size, 2);
        assert_eq!(cfg.loader.split, Split::Train);
        assert_eq!(cfg.loader.train_fraction, 0.8);

        let cli = Cli::try_parse_from(["qa-reader-data", "stats", "--config", config]).unwrap();
        let Commands::Stats(args) = cli.command else { panic!("expected stats") };
        let cfg = PrepareConfig::try_from(args).unwrap();
        assert_eq!(cfg.loader.train_fraction, 0.8);
    }

    #[test]
    fn test_questions_shuffle_by_default() {
        let cli = Cli::try_parse_from(["qa-reader-data", "questions"]).unwrap();
        let Commands::Questions(args) = cli.command else { panic!("expected questions") };
        let cfg = QuestionsConfig::from(args);

        assert_eq!(cfg.loader.batch_size, 8);
        assert!(cfg.loader.shuffle);
        assert_eq!(cfg.split, Split::Train);
    }
}
