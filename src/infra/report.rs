// ============================================================
// Layer 5 - Label Report
// ============================================================
// Tallies how many examples of a split actually got a located
// answer, and optionally appends the tally to a CSV file.
//
// The (0, 0) fallback silently mislabels unanswerable examples,
// so this is the number to check before trusting a dataset.
//
// Example CSV output:
//   split,examples,located,not_located,located_pct,mean_span_tokens
//   train,700,684,16,97.714286,3.412281
//   validation,300,291,9,97.000000,3.501718

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{example::ReaderExample, split::Split};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitStats {
    pub split:       Split,
    pub examples:    usize,
    pub located:     usize,
    pub not_located: usize,

    /// Sum of span lengths over located examples
    span_tokens: usize,
}

impl SplitStats {
    pub fn new(split: Split) -> Self {
        Self { split, examples: 0, located: 0, not_located: 0, span_tokens: 0 }
    }

    pub fn record(&mut self, example: &ReaderExample) {
        self.examples += 1;
        if example.is_located() {
            self.located     += 1;
            self.span_tokens += example.span().span_length();
        } else {
            self.not_located += 1;
        }
    }

    /// Share of located examples in percent, 0 for an empty split
    pub fn located_pct(&self) -> f64 {
        if self.examples == 0 {
            return 0.0;
        }
        self.located as f64 * 100.0 / self.examples as f64
    }

    /// Average answer length in tokens over located examples
    pub fn mean_span_tokens(&self) -> f64 {
        if self.located == 0 {
            return 0.0;
        }
        self.span_tokens as f64 / self.located as f64
    }
}

/// Appends SplitStats rows to `<dir>/label_report.csv`.
pub struct ReportWriter {
    csv_path: PathBuf,
}

impl ReportWriter {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create report directory '{}'", dir.display()))?;

        let csv_path = dir.join("label_report.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "split,examples,located,not_located,located_pct,mean_span_tokens")?;
            tracing::debug!("Created label report: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, s: &SplitStats) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{},{},{:.6},{:.6}",
            s.split,
            s.examples,
            s.located,
            s.not_located,
            s.located_pct(),
            s.mean_span_tokens(),
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::span::{AnswerTarget, SpanTarget};

    fn ex(target: AnswerTarget) -> ReaderExample {
        ReaderExample {
            index:    0,
            question: "q".into(),
            context:  "c".into(),
            answer:   "a".into(),
            target,
        }
    }

    #[test]
    fn test_stats_tally() {
        let mut s = SplitStats::new(Split::Train);
        s.record(&ex(AnswerTarget::Located(SpanTarget::new(2, 3))));
        s.record(&ex(AnswerTarget::Located(SpanTarget::new(5, 5))));
        s.record(&ex(AnswerTarget::NotLocated));
        s.record(&ex(AnswerTarget::NotLocated));

        assert_eq!(s.examples, 4);
        assert_eq!(s.located, 2);
        assert_eq!(s.not_located, 2);
        assert_eq!(s.located_pct(), 50.0);
        assert_eq!(s.mean_span_tokens(), 1.5);
    }

    #[test]
    fn test_empty_stats() {
        let s = SplitStats::new(Split::Validation);
        assert_eq!(s.located_pct(), 0.0);
        assert_eq!(s.mean_span_tokens(), 0.0);
    }

    #[test]
    fn test_report_appends_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        let mut s  = SplitStats::new(Split::Train);
        s.record(&ex(AnswerTarget::Located(SpanTarget::new(0, 1))));

        writer.log(&s).unwrap();
        ReportWriter::new(dir.path()).unwrap().log(&s).unwrap();

        let csv   = fs::read_to_string(writer.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "train,1,1,0,100.000000,2.000000");
    }
}
