// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Batches go to stdout, logs go to stderr.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::io;

use anyhow::Result;
use clap::Parser;
use commands::{BatchesArgs, Commands, QuestionsArgs, StatsArgs};

use crate::application::{
    prepare_use_case::{PrepareConfig, PrepareUseCase},
    questions_use_case::{QuestionsConfig, QuestionsUseCase},
};

#[derive(Parser, Debug)]
#[command(
    name = "qa-reader-data",
    version,
    about = "Label answer spans, split and batch QA records for reader training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Batches(args)   => run_batches(args),
            Commands::Stats(args)     => run_stats(args),
            Commands::Questions(args) => run_questions(args),
        }
    }
}

fn run_batches(args: BatchesArgs) -> Result<()> {
    tracing::info!("Reading records from: {}", args.source.records.display());
    let cfg = PrepareConfig::try_from(args)?;
    PrepareUseCase::new(cfg).write_batches(io::stdout().lock())?;
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let report_dir = args.report_dir.clone();
    let cfg        = PrepareConfig::try_from(args)?;
    let stats      = PrepareUseCase::new(cfg).stats(report_dir)?;

    for s in &stats {
        println!(
            "{:<10} examples={:<6} located={:<6} not_located={:<6} located%={:.1} mean_span_tokens={:.2}",
            s.split,
            s.examples,
            s.located,
            s.not_located,
            s.located_pct(),
            s.mean_span_tokens(),
        );
    }
    Ok(())
}

fn run_questions(args: QuestionsArgs) -> Result<()> {
    let cfg = QuestionsConfig::from(args);
    QuestionsUseCase::new(cfg).write_batches(io::stdout().lock())?;
    Ok(())
}
