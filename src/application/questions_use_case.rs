// ============================================================
// Layer 2 - QuestionsUseCase
// ============================================================
// Question generator data: SQuAD rows for one split, grouped by
// Burn's DataLoader (shuffled by default) and printed as JSON lines.
// No span labelling happens on this path.

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::data::{
    batcher::QuestionBatch,
    loader::{question_generator_loader, QuestionLoaderConfig},
    source::SquadSource,
};
use crate::domain::split::Split;

#[derive(Debug, Clone)]
pub struct QuestionsConfig {
    pub squad_dir: PathBuf,
    pub split:     Split,
    pub loader:    QuestionLoaderConfig,
    pub limit:     Option<usize>,
}

#[derive(Serialize)]
struct QuestionLine<'a> {
    batch:     usize,
    ids:       Vec<&'a str>,
    questions: Vec<&'a str>,
}

pub struct QuestionsUseCase {
    config: QuestionsConfig,
}

impl QuestionsUseCase {
    pub fn new(config: QuestionsConfig) -> Self {
        Self { config }
    }

    pub fn write_batches<W: Write>(&self, mut out: W) -> Result<usize> {
        let cfg    = &self.config;
        let source = SquadSource::new(&cfg.squad_dir);
        let loader = question_generator_loader(&source, cfg.split, &cfg.loader)?;

        let limit = cfg.limit.unwrap_or(usize::MAX);
        let mut written = 0;
        for (i, batch) in loader.iter().take(limit).enumerate() {
            write_line(&mut out, i, &batch)?;
            written += 1;
        }

        out.flush()?;
        tracing::info!("Wrote {} question batches", written);
        Ok(written)
    }
}

fn write_line<W: Write>(out: &mut W, i: usize, batch: &QuestionBatch) -> Result<()> {
    let line = QuestionLine {
        batch:     i,
        ids:       batch.records.iter().map(|r| r.id.as_str()).collect(),
        questions: batch.questions(),
    };
    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squad_questions_are_batched() {
        let dir = tempfile::tempdir().unwrap();
        let qas: Vec<serde_json::Value> = (0..10)
            .map(|i| serde_json::json!({
                "id": format!("q{i}"),
                "question": format!("Question {i}?"),
                "answers": [{"text": "fox", "answer_start": 16}]
            }))
            .collect();
        let squad = serde_json::json!({
            "version": "1.1",
            "data": [{"title": "T", "paragraphs": [{"context": "The quick brown fox", "qas": qas}]}]
        });
        std::fs::write(dir.path().join("train-v1.1.json"), squad.to_string()).unwrap();

        let cfg = QuestionsConfig {
            squad_dir: dir.path().to_path_buf(),
            split:     Split::Train,
            loader:    QuestionLoaderConfig { seed: Some(1), ..Default::default() },
            limit:     None,
        };

        let mut out = Vec::<u8>::new();
        let written = QuestionsUseCase::new(cfg).write_batches(&mut out).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let total: usize = text
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).unwrap();
                v["questions"].as_array().unwrap().len()
            })
            .sum();
        assert_eq!(total, 10);
    }
}
