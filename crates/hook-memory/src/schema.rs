//! Memory hub schema - the JSON and argument contract of the `memory-hub` CLI.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Memory classification passed to `write` and `summarize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Free-form note
    Note,
}

/// Memory visibility scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteScope {
    /// Current session only
    Session,
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => f.write_str("note"),
        }
    }
}

impl fmt::Display for NoteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("session"),
        }
    }
}

/// Result of `memory-hub assemble --json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub memories: Vec<MemoryItem>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub summaries: Vec<SummaryItem>,
}

/// A single retrieved memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(rename = "type", default)]
    pub memory_type: Option<String>,
}

/// A single session/project summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    #[serde(default)]
    pub content: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decoded assemble output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// Output matched the schema
    Result(AssembleResult),
    /// Output was not a valid assemble object
    Invalid(String),
}

impl Assembled {
    /// Decode raw stdout from `assemble`.
    pub fn decode(stdout: &str) -> Self {
        match serde_json::from_str::<AssembleResult>(stdout.trim()) {
            Ok(result) => Self::Result(result),
            Err(e) => Self::Invalid(e.to_string()),
        }
    }

    pub fn result(&self) -> Option<&AssembleResult> {
        match self {
            Self::Result(result) => Some(result),
            Self::Invalid(_) => None,
        }
    }
}

impl AssembleResult {
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty() && self.summaries.is_empty()
    }
}
