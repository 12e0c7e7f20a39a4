// ============================================================
// Layer 4 - File Sources
// ============================================================
// File-backed implementations of the domain source traits.
//
//   JsonRecordSource - the example store, from either
//                        *.json   one JSON array of records
//                        *.jsonl  one record per line
//   SquadSource      - question-only rows for the generator,
//                      from SQuAD v1.1 / v2.0 JSON files
//
// A malformed JSON-lines row is logged and skipped; the rest of
// the file still loads.
//
// Reference: serde_json documentation
//            Rajpurkar et al. (2016) - SQuAD file format

use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::domain::{
    qa_record::QaRecord,
    question::{QuestionRecord, SquadAnswers},
    split::Split,
    traits::{QuestionSource, RecordSource},
};

// ─── JsonRecordSource ─────────────────────────────────────────────────────────
pub struct JsonRecordSource {
    path: PathBuf,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json_lines(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("jsonl") | Some("ndjson")
        )
    }

    fn load_array(&self) -> Result<Vec<QaRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open records file '{}'", self.path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Cannot parse records array in '{}'", self.path.display()))
    }

    fn load_lines(&self) -> Result<Vec<QaRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open records file '{}'", self.path.display()))?;

        let mut records = Vec::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<QaRecord>(&line) {
                Ok(rec) => records.push(rec),
                Err(e) => tracing::warn!(
                    "Skipping line {} of '{}': {}",
                    line_no + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

impl RecordSource for JsonRecordSource {
    fn load_all(&self) -> Result<Vec<QaRecord>> {
        let records = if self.is_json_lines() {
            self.load_lines()?
        } else {
            self.load_array()?
        };
        tracing::info!("Loaded {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

// ─── SquadSource ──────────────────────────────────────────────────────────────
#[derive(Debug, Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    #[serde(default)]
    title:      String,
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    context: String,
    qas:     Vec<SquadQa>,
}

#[derive(Debug, Deserialize)]
struct SquadQa {
    id:       String,
    question: String,
    #[serde(default)]
    answers:  Vec<SquadAnswer>,
}

#[derive(Debug, Deserialize)]
struct SquadAnswer {
    text:         String,
    answer_start: usize,
}

/// Reads `train-v1.1.json` / `dev-v1.1.json` (or the v2.0 names)
/// from a directory.
pub struct SquadSource {
    dir: PathBuf,
}

impl SquadSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidates(split: Split) -> [&'static str; 2] {
        match split {
            Split::Train      => ["train-v1.1.json", "train-v2.0.json"],
            Split::Validation => ["dev-v1.1.json", "dev-v2.0.json"],
        }
    }

    fn resolve_path(&self, split: Split) -> Result<PathBuf> {
        for name in Self::candidates(split) {
            let path = self.dir.join(name);
            if path.exists() {
                return Ok(path);
            }
        }
        bail!(
            "No SQuAD {} file in '{}' (looked for {:?})",
            split,
            self.dir.display(),
            Self::candidates(split)
        )
    }
}

impl QuestionSource for SquadSource {
    fn load_split(&self, split: Split) -> Result<Vec<QuestionRecord>> {
        let path = self.resolve_path(split)?;
        let rows = parse_squad(&path)?;
        tracing::debug!("Read {} SQuAD rows from '{}'", rows.len(), path.display());
        Ok(rows)
    }
}

fn parse_squad(path: &Path) -> Result<Vec<QuestionRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    let file: SquadFile = serde_json::from_str(&json)
        .with_context(|| format!("Cannot parse SQuAD file '{}'", path.display()))?;

    let mut rows = Vec::new();
    for article in file.data {
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                let (text, answer_start) = qa
                    .answers
                    .into_iter()
                    .map(|a| (a.text, a.answer_start))
                    .unzip();

                rows.push(QuestionRecord {
                    id:       qa.id,
                    title:    article.title.clone(),
                    context:  paragraph.context.clone(),
                    question: qa.question,
                    answers:  SquadAnswers { text, answer_start },
                });
            }
        }
    }
    Ok(rows)
}
