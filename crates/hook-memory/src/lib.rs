//! Memory hub integration for agent hooks.
//!
//! Provides:
//! - The `memory-hub` command-line contract
//! - Typed decoding of `assemble` output
//! - Context pack rendering

pub mod format;
pub mod hub;
pub mod schema;

pub use format::{CONTEXT_END, CONTEXT_START, format_context};
pub use hub::MemoryHub;
pub use schema::{AssembleResult, Assembled, MemoryItem, NoteScope, NoteType, SummaryItem};
