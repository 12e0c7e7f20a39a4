// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between raw records and training batches.
//
//   records (.json / .jsonl)
//       │
//       ▼
//   JsonRecordSource  → the ordered example store
//       │
//       ▼
//   Partition         → train prefix / validation suffix
//       │
//       ▼
//   ReaderDataset     → one side of the partition, labelled on demand
//       │               (truncate → locate answer → resolve tokens)
//       ▼
//   ReaderLoader      → Burn DataLoader: lazy, optionally
//       │               shuffled batches per pass
//       ▼
//   ReaderBatcher     → examples plus target tensors per batch
//
// The question generator path is shorter: SquadSource →
// QuestionDataset → Burn DataLoader.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Character span → token span conversion
pub mod resolver;

/// Truncation, answer lookup and per-record labelling
pub mod adapter;

/// Order-preserving train/validation partition
pub mod splitter;

/// Split views and Burn datasets
pub mod dataset;

/// Batch types and Burn batchers
pub mod batcher;

/// Reader and question generator loaders
pub mod loader;

/// JSON record files and SQuAD question files
pub mod source;
