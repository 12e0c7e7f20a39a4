// ============================================================
// qa_reader_data - reader training data preparation
// ============================================================
// Layer 1 - cli/          argument parsing, subcommand routing
// Layer 2 - application/  use cases (batches, stats, questions)
// Layer 3 - domain/       records, spans, examples, traits
// Layer 4 - data/         span resolution, split, loaders
// Layer 5 - infra/        tokenizer persistence, label report
//
// Reference: Rust Book §7 (Packages, Crates and Modules)

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

#[cfg(test)]
mod test_support;
