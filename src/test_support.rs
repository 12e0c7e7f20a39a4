// Deterministic tokenizers used by the unit tests.

use anyhow::{bail, Result};

use crate::domain::{qa_record::QaRecord, traits::OffsetTokenizer};

/// Splits on whitespace; every maximal non-whitespace run is one token.
pub struct WhitespaceTokenizer;

impl OffsetTokenizer for WhitespaceTokenizer {
    fn offsets(&self, text: &str) -> Result<Vec<(usize, usize)>> {
        let mut out   = Vec::new();
        let mut start = None;
        let mut count = 0;
        for (i, c) in text.chars().enumerate() {
            match (c.is_whitespace(), start) {
                (true, Some(s))  => { out.push((s, i)); start = None; }
                (false, None)    => start = Some(i),
                _                => {}
            }
            count = i + 1;
        }
        if let Some(s) = start {
            out.push((s, count));
        }
        Ok(out)
    }
}

/// Like `WhitespaceTokenizer`, but cuts every word into pieces of at
/// most `piece` characters, imitating subword tokenization.
pub struct PieceTokenizer {
    pub piece: usize,
}

impl OffsetTokenizer for PieceTokenizer {
    fn offsets(&self, text: &str) -> Result<Vec<(usize, usize)>> {
        let words = WhitespaceTokenizer.offsets(text)?;
        Ok(words
            .into_iter()
            .flat_map(|(s, e)| {
                (s..e).step_by(self.piece).map(move |p| (p, (p + self.piece).min(e)))
            })
            .collect())
    }
}

/// Always fails, for error propagation tests.
pub struct BrokenTokenizer;

impl OffsetTokenizer for BrokenTokenizer {
    fn offsets(&self, _text: &str) -> Result<Vec<(usize, usize)>> {
        bail!("tokenizer unavailable")
    }
}

/// `n` records whose answer is always locatable, tagged by index.
pub fn numbered_records(n: usize) -> Vec<QaRecord> {
    (0..n)
        .map(|i| {
            QaRecord::new(
                format!("question {i}?"),
                format!("record {i} has answer{i} inside"),
                format!("answer{i}"),
            )
        })
        .collect()
}

/// Whitespace tokenizer that counts how often it was asked for offsets.
#[derive(Default)]
pub struct CountingTokenizer {
    pub calls: std::sync::atomic::AtomicUsize,
}

impl OffsetTokenizer for CountingTokenizer {
    fn offsets(&self, text: &str) -> Result<Vec<(usize, usize)>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        WhitespaceTokenizer.offsets(text)
    }
}
