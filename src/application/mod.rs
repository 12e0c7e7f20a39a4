// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Workflow coordination only: these use cases wire sources,
// tokenizer and loaders together and decide what gets written
// where. No span logic lives here.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Reader batches and label statistics
pub mod prepare_use_case;

// Question-only batches for the question generator
pub mod questions_use_case;
