//! Hook input parsing from stdin.
//!
//! The host runtime hands every lifecycle event over as a single JSON object
//! of the shape `{type, action, context}`. The loose `(type, action)` pair is
//! narrowed into [`HookEvent`] before anything is dispatched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;

/// Agent identifier used when the host does not send one.
pub const DEFAULT_AGENT_ID: &str = "main";

/// Errors raised while validating an event at the boundary.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("event context has no workspaceDir")]
    MissingWorkspace,

    #[error("Failed to read hook input: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to parse hook input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Main hook input structure received from the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInput {
    /// Event family (e.g., "agent", "message", "command")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Event action within the family (e.g., "bootstrap", "received")
    #[serde(default)]
    pub action: String,

    /// Event payload
    #[serde(default)]
    pub context: EventContext,
}

/// Per-event context carried alongside the event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    /// Workspace the agent runs in
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,

    /// Message text for message events
    #[serde(default)]
    pub content: Option<String>,

    /// Agent identifier
    #[serde(default)]
    pub agent_id: Option<String>,

    /// Host configuration tree
    #[serde(default)]
    pub cfg: Option<serde_json::Value>,

    /// Files the host reads into the agent context after bootstrap
    #[serde(default)]
    pub bootstrap_files: Vec<BootstrapFile>,

    /// Additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A file the host injects into the agent's bootstrap context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapFile {
    pub name: String,
    pub path: PathBuf,
}

/// Lifecycle event after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// `agent:bootstrap`
    AgentBootstrap,
    /// `message:received`
    MessageReceived,
    /// `message:sent`
    MessageSent,
    /// `command:stop`
    CommandStop,
    /// Any other combination; tolerated and ignored.
    Unhandled { kind: String, action: String },
}

impl HookEvent {
    /// Map a `(type, action)` pair to the routine that handles it.
    pub fn classify(kind: &str, action: &str) -> Self {
        match (kind, action) {
            ("agent", "bootstrap") => Self::AgentBootstrap,
            ("message", "received") => Self::MessageReceived,
            ("message", "sent") => Self::MessageSent,
            ("command", "stop") => Self::CommandStop,
            _ => Self::Unhandled {
                kind: kind.to_string(),
                action: action.to_string(),
            },
        }
    }

    /// Short `type:action` label used in log lines.
    pub fn label(&self) -> String {
        match self {
            Self::AgentBootstrap => "agent:bootstrap".to_string(),
            Self::MessageReceived => "message:received".to_string(),
            Self::MessageSent => "message:sent".to_string(),
            Self::CommandStop => "command:stop".to_string(),
            Self::Unhandled { kind, action } => format!("{}:{}", kind, action),
        }
    }
}

impl HookInput {
    /// Read and parse hook input from stdin.
    pub fn from_stdin() -> Result<Self, InputError> {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Self::from_json(&input)
    }

    /// Parse hook input from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Classify this input into a [`HookEvent`].
    pub fn event(&self) -> HookEvent {
        HookEvent::classify(&self.kind, &self.action)
    }
}

impl EventContext {
    /// Workspace directory, required for every event.
    pub fn require_workspace(&self) -> Result<PathBuf, InputError> {
        match &self.workspace_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => Err(InputError::MissingWorkspace),
        }
    }

    /// Agent identifier, falling back to [`DEFAULT_AGENT_ID`].
    pub fn agent_id(&self) -> &str {
        match self.agent_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => DEFAULT_AGENT_ID,
        }
    }

    /// Message content, if any non-empty text was sent.
    pub fn message(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}
