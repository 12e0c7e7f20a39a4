// ============================================================
// Layer 5 - Tokenizer Store
// ============================================================
// Provides the offset-mapping tokenizer the span resolver needs.
//
//   - load()           → an existing HuggingFace tokenizer.json,
//                        e.g. the one shipped with the reader model
//   - load_or_build()  → load if present, otherwise build an
//                        offsets-only tokenizer and save it
//
// Only offsets matter for span labelling, so the built tokenizer
// is a whitespace pre-tokenizer in front of a WordLevel model that
// knows a single [UNK] token. Every word maps to [UNK] but keeps
// its own offsets.
//
// This file also makes tokenizers::Tokenizer an OffsetTokenizer.
// encode_char_offsets reports character offsets, which is the
// coordinate system the span resolver works in (plain encode
// reports byte offsets).
//
// Reference: HuggingFace tokenizers documentation

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use tokenizers::{
    models::wordlevel::WordLevel, pre_tokenizers::whitespace::Whitespace, Tokenizer,
};

use crate::domain::traits::OffsetTokenizer;

const TOKENIZER_FILE: &str = "tokenizer.json";
const UNK_TOKEN:      &str = "[UNK]";

impl OffsetTokenizer for Tokenizer {
    fn offsets(&self, text: &str) -> Result<Vec<(usize, usize)>> {
        let enc = self
            .encode_char_offsets(text, false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
        Ok(enc.get_offsets().to_vec())
    }
}

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load the stored tokenizer, or build and store an offsets-only one
    pub fn load_or_build(&self) -> Result<Tokenizer> {
        if self.path().exists() {
            tracing::info!("Loading existing tokenizer from '{}'", self.path().display());
            self.load()
        } else {
            tracing::info!("No tokenizer in '{}', building a whitespace one", self.dir.display());
            self.build_and_save()
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        load_tokenizer_file(self.path())
    }

    fn build_and_save(&self) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let tokenizer = offsets_only_tokenizer()?;
        let path      = self.path();
        tokenizer
            .save(&path, true)
            .map_err(|e| anyhow::anyhow!("Cannot write tokenizer to '{}': {}", path.display(), e))?;

        tracing::info!("Tokenizer saved to '{}'", path.display());
        Ok(tokenizer)
    }
}

/// Load any HuggingFace tokenizer.json
pub fn load_tokenizer_file(path: impl Into<PathBuf>) -> Result<Tokenizer> {
    let path = path.into();
    Tokenizer::from_file(&path)
        .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
}

/// Whitespace/punctuation splitting with one [UNK] vocabulary entry
pub fn offsets_only_tokenizer() -> Result<Tokenizer> {
    let vocab = HashMap::from([(UNK_TOKEN.to_string(), 0u32)]);
    let model = WordLevel::builder()
        .vocab(vocab)
        .unk_token(UNK_TOKEN.to_string())
        .build()
        .map_err(|e| anyhow::anyhow!("Cannot build WordLevel model: {e}"))?;

    let mut tokenizer = Tokenizer::new(model);
    tokenizer.with_pre_tokenizer(Whitespace);
    Ok(tokenizer)
}
