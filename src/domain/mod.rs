// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the data IS.
//
// Rules for this layer:
//   - NO Burn types
//   - NO file I/O
//   - NO tokenizer implementations, only the capability trait
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A raw question/context/answer row
pub mod qa_record;

// Character spans, token spans and the located/not-located outcome
pub mod span;

// The labelled triple handed to training
pub mod example;

// Question-only rows for the generator loader
pub mod question;

// Train / validation selector
pub mod split;

// Core abstractions (traits) that other layers implement
pub mod traits;
