// ============================================================
// Layer 5 - Infrastructure Layer
// ============================================================
// Cross-cutting pieces that talk to the outside world:
//
//   tokenizer_store.rs - loads a HuggingFace tokenizer.json, or
//                        builds and saves an offsets-only
//                        whitespace one; also adapts
//                        tokenizers::Tokenizer to OffsetTokenizer
//
//   report.rs          - located / not-located tallies per split,
//                        appended to a CSV file
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Tokenizer loading, building and the offset capability
pub mod tokenizer_store;

/// Label quality report
pub mod report;
