//! Action journal
//!
//! Every successful dispatch emits one event to the configured sinks:
//! - File (JSONL) - writes to <journal>/YYYY-MM/YYYY-MM-DD.jsonl
//! - Stderr - prints formatted events, keeping stdout for command output
//! - HTTP - POSTs events to configured endpoint

pub mod emitter;

pub use emitter::JournalEmitter;
